//! Preview request handler
//!
//! Stands in for the rendering surface: every incoming HTTP request is turned
//! into an intercepted resource load and answered with whatever the
//! interceptor decides.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HOST, USER_AGENT};
use hyper::http::uri::PathAndQuery;
use hyper::{Method, Request, Response, Uri};

use crate::config::AppState;
use crate::handler::INDEX_FILE;
use crate::http;
use crate::interceptor::{InterceptedRequest, Interception, Interceptor};
use crate::logger::{self, AccessLogEntry};
use crate::origin::ASSETS_PATH;
use crate::router::Router;

/// Main entry point for preview requests
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let start = Instant::now();
    let method = req.method().clone();
    let url = request_url(&req);

    let (response, outcome) = match method {
        Method::GET | Method::HEAD => {
            if is_virtual_root(&url, state.interceptor.router()) {
                let target = format!("{ASSETS_PATH}{INDEX_FILE}");
                (http::build_redirect_response(&target), "redirected")
            } else {
                let request = InterceptedRequest::new(url.clone(), method.as_str());
                intercept(Arc::clone(&state.interceptor), request, method == Method::HEAD).await
            }
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            (http::build_405_response(), "rejected")
        }
    };

    if state.access_log() {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), url);
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
        entry.user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.outcome = outcome;
        entry.request_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Run the interceptor off the async workers; handlers do blocking reads
async fn intercept(
    interceptor: Arc<Interceptor>,
    request: InterceptedRequest,
    is_head: bool,
) -> (Response<Full<Bytes>>, &'static str) {
    let result = tokio::task::spawn_blocking(move || match interceptor.should_intercept(&request) {
        Interception::Respond(resp) => {
            let outcome = if resp.is_success() { "served" } else { "not-found" };
            (http::build_intercepted_response(resp, is_head), outcome)
        }
        Interception::Decline => (http::build_421_response(&request.url), "declined"),
    })
    .await;

    result.unwrap_or_else(|e| {
        logger::log_error(&format!("Interception task failed: {e}"));
        (http::build_500_response(), "failed")
    })
}

/// Absolute URL of the request as a rendering surface would see it
///
/// Absolute-form request targets are used as-is; otherwise the URL is rebuilt
/// from the `Host` header over plain `http`.
pub fn request_url<B>(req: &Request<B>) -> String {
    let uri = req.uri();
    if uri.scheme().is_some() && uri.authority().is_some() {
        return uri.to_string();
    }

    let host = req
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path = uri.path_and_query().map_or("/", PathAndQuery::as_str);
    format!("http://{host}{path}")
}

/// Whether `url` is the bare root of the virtual origin
fn is_virtual_root(url: &str, router: &Router) -> bool {
    let Ok(uri) = url.parse::<Uri>() else {
        return false;
    };
    match (uri.scheme_str(), uri.host()) {
        (Some(scheme), Some(host)) => {
            uri.path() == "/" && router.origin().matches(scheme, host, router.http_allowed())
        }
        _ => false,
    }
}

const fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn state() -> Arc<AppState> {
        let mut config = Config::from_toml("").unwrap();
        config.logging.access_log = false;
        Arc::new(AppState::new(config).unwrap())
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    fn get(uri: &str, host: &str) -> Request<()> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(HOST, host)
            .body(())
            .unwrap()
    }

    #[test]
    fn test_request_url_from_host_header() {
        let req = get("/assets/index.html?x=1", "appassets.androidplatform.net:8080");
        assert_eq!(
            request_url(&req),
            "http://appassets.androidplatform.net:8080/assets/index.html?x=1"
        );
    }

    #[test]
    fn test_request_url_absolute_form() {
        let req = get("https://appassets.androidplatform.net/assets/a.css", "ignored");
        assert_eq!(request_url(&req), "https://appassets.androidplatform.net/assets/a.css");
    }

    #[tokio::test]
    async fn test_serves_embedded_index() {
        let req = get("/assets/index.html", "appassets.androidplatform.net");
        let resp = handle_request(req, state(), peer()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(!body.is_empty());
    }

    #[tokio::test]
    async fn test_root_redirects_to_entry_point() {
        let req = get("/", "appassets.androidplatform.net");
        let resp = handle_request(req, state(), peer()).await.unwrap();
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers().get("location").unwrap(), "/assets/index.html");
    }

    #[tokio::test]
    async fn test_unmapped_and_traversal_are_404() {
        for uri in ["/other/x", "/assets/../../etc/passwd", "/assets/missing.js"] {
            let req = get(uri, "appassets.androidplatform.net");
            let resp = handle_request(req, state(), peer()).await.unwrap();
            assert_eq!(resp.status(), 404, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_foreign_host_is_declined() {
        let req = get("/assets/index.html", "example.com");
        let resp = handle_request(req, state(), peer()).await.unwrap();
        assert_eq!(resp.status(), 421);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/assets/index.html")
            .header(HOST, "appassets.androidplatform.net")
            .body(())
            .unwrap();
        let resp = handle_request(req, state(), peer()).await.unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/assets/index.html")
            .header(HOST, "appassets.androidplatform.net")
            .body(())
            .unwrap();
        let resp = handle_request(req, state(), peer()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().get("content-length").is_some());
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
