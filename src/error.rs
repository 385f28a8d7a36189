//! Error types shared across the crate
//!
//! Interception itself never fails: every error here is resolved into either a
//! decline or a not-found response before it reaches the rendering surface.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Route table construction errors, detected once at startup
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("virtual origin host must not be empty")]
    EmptyHost,

    #[error("path prefix '{0}' must start and end with '/'")]
    InvalidPrefix(String),

    #[error("path prefix '{0}' is registered more than once")]
    DuplicatePrefix(String),
}

/// Failure to open a resource for a path suffix
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("resource not found: '{0}'")]
    NotFound(String),

    #[error("failed to read '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Startup wiring errors
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("invalid route table: {0}")]
    Routes(#[from] BuildError),

    #[error("asset directory '{}' is not usable: {source}", path.display())]
    AssetDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
