//! HTTP protocol layer module
//!
//! MIME detection and response types shared by the interceptor and the
//! preview host.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_421_response, build_500_response,
    build_intercepted_response, build_redirect_response, InterceptedResponse,
};
