//! Virtual origin definition
//!
//! The reserved origin never corresponds to a real network destination; it is
//! only a routing key the interceptor recognizes.

use std::fmt;

/// Host of the reserved virtual origin
pub const APPASSETS_DOMAIN: &str = "appassets.androidplatform.net";

/// Path prefix bound to the embedded asset bundle
pub const ASSETS_PATH: &str = "/assets/";

/// Entry point handed to the rendering surface at startup
pub const INITIAL_URL: &str = "https://appassets.androidplatform.net/assets/index.html";

/// Scheme/host pair identifying the virtual origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualOrigin {
    scheme: String,
    host: String,
}

impl VirtualOrigin {
    /// Create a virtual origin. Scheme and host are stored lowercase.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into().to_ascii_lowercase(),
            host: host.into().to_ascii_lowercase(),
        }
    }

    /// `https://appassets.androidplatform.net`
    pub fn appassets() -> Self {
        Self::new("https", APPASSETS_DOMAIN)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Check a request's scheme and host against this origin
    ///
    /// Host comparison is ASCII case-insensitive. With `http_allowed`, plain
    /// `http` is accepted in addition to the configured scheme.
    pub fn matches(&self, scheme: &str, host: &str, http_allowed: bool) -> bool {
        let scheme_ok = scheme.eq_ignore_ascii_case(&self.scheme)
            || (http_allowed && scheme.eq_ignore_ascii_case("http"));
        scheme_ok && host.eq_ignore_ascii_case(&self.host)
    }
}

impl fmt::Display for VirtualOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}
