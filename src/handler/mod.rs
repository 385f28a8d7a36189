//! Path handler module
//!
//! A path handler turns a normalized path suffix into a byte stream and MIME
//! type. Two implementations ship with the crate:
//! - `EmbeddedAssetsHandler` for the bundle compiled into the binary
//! - `DirectoryHandler` for a read-only directory on disk

pub mod directory;
pub mod embedded;

pub use directory::DirectoryHandler;
pub use embedded::EmbeddedAssetsHandler;

use crate::error::OpenError;
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Cursor, Read};

/// File served for directory-style suffixes
pub const INDEX_FILE: &str = "index.html";

/// Serves the suffixes under one registered path prefix
///
/// Implementations are shared across resource-loading threads and must only
/// perform read-only access to immutable data.
pub trait PathHandler: Send + Sync + fmt::Debug {
    /// Open the resource for `suffix`
    fn open(&self, suffix: &str) -> Result<Asset, OpenError>;

    /// Handler name used in logs
    fn name(&self) -> &'static str;
}

/// An opened resource; the body stream is owned by whoever consumes it
pub struct Asset {
    pub body: Box<dyn Read + Send>,
    pub mime_type: &'static str,
    pub len: Option<u64>,
}

impl Asset {
    /// Wrap bytes that live for the whole process
    pub fn from_static(bytes: &'static [u8], mime_type: &'static str) -> Self {
        Self {
            body: Box::new(Cursor::new(bytes)),
            mime_type,
            len: Some(bytes.len() as u64),
        }
    }

    /// Drain the body stream
    pub fn read_to_vec(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("mime_type", &self.mime_type)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Map directory-style suffixes (empty or trailing `/`) to their index file
pub fn with_index(suffix: &str) -> Cow<'_, str> {
    if suffix.is_empty() || suffix.ends_with('/') {
        Cow::Owned(format!("{suffix}{INDEX_FILE}"))
    } else {
        Cow::Borrowed(suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_index() {
        assert_eq!(with_index(""), "index.html");
        assert_eq!(with_index("docs/"), "docs/index.html");
        assert_eq!(with_index("app.js"), "app.js");
    }

    #[test]
    fn test_static_asset_body() {
        let asset = Asset::from_static(b"hello", "text/plain");
        assert_eq!(asset.len, Some(5));
        assert_eq!(asset.read_to_vec().unwrap(), b"hello");
    }
}
