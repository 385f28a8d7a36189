//! Route table and resolution
//!
//! The table is built once by [`RouterBuilder`] and never mutated afterwards,
//! so `resolve` runs lock-free from any thread.

use super::path::{escape_unsafe, normalize_suffix, percent_decode, split_origin};
use crate::error::BuildError;
use crate::handler::PathHandler;
use crate::logger;
use crate::origin::VirtualOrigin;
use hyper::Uri;
use std::collections::HashSet;
use std::sync::Arc;

/// A registered path prefix and the handler that owns it
#[derive(Debug, Clone)]
pub struct RouteEntry {
    prefix: String,
    handler: Arc<dyn PathHandler>,
}

impl RouteEntry {
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn handler(&self) -> &Arc<dyn PathHandler> {
        &self.handler
    }
}

/// Handler and normalized suffix selected for a URL
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub prefix: String,
    pub handler: Arc<dyn PathHandler>,
    pub suffix: String,
}

/// Outcome of [`Router::resolve`]
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Virtual origin and a prefix matched
    Match(RouteMatch),
    /// Not the virtual origin; the surface should load it normally
    OriginMismatch,
    /// Virtual origin, but no registered prefix claims the path
    NoRouteMatch,
    /// The suffix would escape the bundle root, or the path is malformed
    TraversalRejected,
}

impl Resolution {
    /// Short label for logging
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Match(_) => "match",
            Self::OriginMismatch => "origin-mismatch",
            Self::NoRouteMatch => "no-route",
            Self::TraversalRejected => "traversal-rejected",
        }
    }
}

/// Immutable virtual-origin router
#[derive(Debug)]
pub struct Router {
    origin: VirtualOrigin,
    http_allowed: bool,
    /// Sorted by prefix length, longest first
    routes: Vec<RouteEntry>,
}

impl Router {
    pub fn builder(origin: VirtualOrigin) -> RouterBuilder {
        RouterBuilder::new(origin)
    }

    pub const fn origin(&self) -> &VirtualOrigin {
        &self.origin
    }

    pub const fn http_allowed(&self) -> bool {
        self.http_allowed
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Decide which handler, if any, owns `url`
    pub fn resolve(&self, url: &str) -> Resolution {
        let uri = match url.parse::<Uri>() {
            Ok(uri) => uri,
            // Surfaces hand over URLs with raw spaces and the like; retry escaped
            Err(_) => match escape_unsafe(url).parse::<Uri>() {
                Ok(uri) => uri,
                Err(_) => return self.resolve_unparsable(url),
            },
        };
        let (Some(scheme), Some(host)) = (uri.scheme_str(), uri.host()) else {
            return Resolution::OriginMismatch;
        };
        if !self.origin.matches(scheme, host, self.http_allowed) {
            return Resolution::OriginMismatch;
        }

        let Some(path) = percent_decode(uri.path()) else {
            logger::log_warning(&format!("Malformed path rejected: {url}"));
            return Resolution::TraversalRejected;
        };

        let Some(entry) = self
            .routes
            .iter()
            .find(|entry| path.starts_with(entry.prefix.as_str()))
        else {
            return Resolution::NoRouteMatch;
        };

        match normalize_suffix(&path[entry.prefix.len()..]) {
            Some(suffix) => Resolution::Match(RouteMatch {
                prefix: entry.prefix.clone(),
                handler: Arc::clone(&entry.handler),
                suffix,
            }),
            None => {
                logger::log_warning(&format!("Path traversal attempt blocked: {url}"));
                Resolution::TraversalRejected
            }
        }
    }

    /// A URL no parser accepts is only declined when it is clearly foreign
    fn resolve_unparsable(&self, url: &str) -> Resolution {
        match split_origin(url) {
            Some((scheme, host)) if self.origin.matches(scheme, host, self.http_allowed) => {
                logger::log_warning(&format!("Malformed URL rejected: {url}"));
                Resolution::TraversalRejected
            }
            _ => Resolution::OriginMismatch,
        }
    }
}

/// Collects route registrations before the router is frozen
#[derive(Debug)]
pub struct RouterBuilder {
    origin: VirtualOrigin,
    http_allowed: bool,
    routes: Vec<RouteEntry>,
}

impl RouterBuilder {
    pub const fn new(origin: VirtualOrigin) -> Self {
        Self {
            origin,
            http_allowed: false,
            routes: Vec::new(),
        }
    }

    /// Also accept plain `http` requests to the virtual origin
    #[must_use]
    pub fn http_allowed(mut self, allowed: bool) -> Self {
        self.http_allowed = allowed;
        self
    }

    /// Register a handler for a path prefix such as `/assets/`
    #[must_use]
    pub fn add_path_handler(self, prefix: impl Into<String>, handler: impl PathHandler + 'static) -> Self {
        self.add_shared_handler(prefix, Arc::new(handler))
    }

    /// Register an already shared handler for a path prefix
    #[must_use]
    pub fn add_shared_handler(mut self, prefix: impl Into<String>, handler: Arc<dyn PathHandler>) -> Self {
        self.routes.push(RouteEntry {
            prefix: prefix.into(),
            handler,
        });
        self
    }

    /// Validate the registrations and freeze the table
    pub fn build(mut self) -> Result<Router, BuildError> {
        if self.origin.host().is_empty() {
            return Err(BuildError::EmptyHost);
        }

        let mut seen = HashSet::new();
        for entry in &self.routes {
            let prefix = entry.prefix.as_str();
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                return Err(BuildError::InvalidPrefix(prefix.to_string()));
            }
            if !seen.insert(prefix) {
                return Err(BuildError::DuplicatePrefix(prefix.to_string()));
            }
        }

        self.routes
            .sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Ok(Router {
            origin: self.origin,
            http_allowed: self.http_allowed,
            routes: self.routes,
        })
    }
}
