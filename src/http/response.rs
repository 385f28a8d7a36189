//! Response building module
//!
//! Two kinds of responses live here:
//! - `InterceptedResponse`, the value handed back to the rendering surface
//! - hyper responses used by the preview host

use crate::handler::Asset;
use crate::http::mime;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt;
use std::io::{self, Cursor, Read};

const NOT_FOUND_BODY: &str = "404 Not Found";

/// Response supplied in place of a network load
///
/// The body stream is owned by the consumer, which reads and drops it.
pub struct InterceptedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub mime_type: Option<&'static str>,
    pub encoding: Option<&'static str>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Box<dyn Read + Send>,
}

impl InterceptedResponse {
    /// 200 response streaming an opened asset
    pub fn from_asset(asset: Asset) -> Self {
        let mut headers = Vec::new();
        if let Some(len) = asset.len {
            headers.push(("Content-Length", len.to_string()));
        }

        Self {
            status: 200,
            reason: "OK",
            mime_type: Some(asset.mime_type),
            encoding: mime::get_encoding(asset.mime_type),
            headers,
            body: asset.body,
        }
    }

    /// Clean not-found failure for virtual-origin requests nothing can serve
    pub fn not_found() -> Self {
        Self {
            status: 404,
            reason: "Not Found",
            mime_type: Some("text/plain"),
            encoding: Some("utf-8"),
            headers: Vec::new(),
            body: Box::new(Cursor::new(NOT_FOUND_BODY.as_bytes())),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// `Content-Type` header value, with charset when the encoding is known
    pub fn content_type(&self) -> Option<String> {
        let mime_type = self.mime_type?;
        Some(match self.encoding {
            Some(encoding) => format!("{mime_type}; charset={encoding}"),
            None => mime_type.to_string(),
        })
    }

    /// Drain the body stream
    pub fn read_body(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Debug for InterceptedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptedResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("mime_type", &self.mime_type)
            .field("encoding", &self.encoding)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Convert an intercepted response into a hyper response
///
/// The body stream is read fully here; bundle reads are local so this is cheap.
pub fn build_intercepted_response(resp: InterceptedResponse, is_head: bool) -> Response<Full<Bytes>> {
    let status = resp.status;
    let content_type = resp.content_type();
    let headers = resp.headers.clone();

    let data = match resp.read_body() {
        Ok(data) => data,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to read intercepted body: {e}"));
            return build_500_response();
        }
    };

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    for (name, value) in headers {
        if name.eq_ignore_ascii_case("Content-Length") {
            continue;
        }
        builder = builder.header(name, value);
    }

    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(data) };

    builder
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("intercepted", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(NOT_FOUND_BODY)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_BODY)))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 421 Misdirected Request response for declined requests
///
/// The preview host never fetches real origins.
pub fn build_421_response(url: &str) -> Response<Full<Bytes>> {
    let body = format!("421 Misdirected Request: {url} is not served by this host");
    Response::builder()
        .status(421)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("421", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 302 redirect response
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(302)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Redirecting...")))
        .unwrap_or_else(|e| {
            log_build_error("302", &e);
            Response::new(Full::new(Bytes::from("Redirecting...")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
