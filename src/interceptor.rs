//! Request interceptor
//!
//! Given first refusal on every resource load of the rendering surface. The
//! interceptor keeps no state between calls; each request is resolved exactly
//! once, synchronously, into one of two outcomes the surface understands:
//! a response to use instead of the network, or a decline.

use crate::error::OpenError;
use crate::http::InterceptedResponse;
use crate::logger;
use crate::router::{Resolution, Router};

/// A resource load offered to the interceptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedRequest {
    pub url: String,
    pub method: String,
}

impl InterceptedRequest {
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, "GET")
    }
}

/// Interceptor decision for one request
#[derive(Debug)]
pub enum Interception {
    /// Use this response; the network is never consulted
    Respond(InterceptedResponse),
    /// Not ours; the surface performs its normal load
    Decline,
}

impl Interception {
    pub const fn is_decline(&self) -> bool {
        matches!(self, Self::Decline)
    }

    pub fn into_response(self) -> Option<InterceptedResponse> {
        match self {
            Self::Respond(resp) => Some(resp),
            Self::Decline => None,
        }
    }
}

#[derive(Debug)]
pub struct Interceptor {
    router: Router,
}

impl Interceptor {
    pub const fn new(router: Router) -> Self {
        Self { router }
    }

    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Decide how `request` is satisfied
    pub fn should_intercept(&self, request: &InterceptedRequest) -> Interception {
        match self.router.resolve(&request.url) {
            Resolution::OriginMismatch => Interception::Decline,
            Resolution::NoRouteMatch | Resolution::TraversalRejected => {
                Interception::Respond(InterceptedResponse::not_found())
            }
            Resolution::Match(route) => match route.handler.open(&route.suffix) {
                Ok(asset) => Interception::Respond(InterceptedResponse::from_asset(asset)),
                Err(OpenError::NotFound(_)) => {
                    Interception::Respond(InterceptedResponse::not_found())
                }
                Err(e @ OpenError::Unreadable { .. }) => {
                    logger::log_error(&format!(
                        "{} handler failed for {}: {e}",
                        route.handler.name(),
                        request.url
                    ));
                    Interception::Respond(InterceptedResponse::not_found())
                }
            },
        }
    }
}
