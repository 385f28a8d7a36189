//! Directory handler
//!
//! Serves suffixes from a directory on disk. Used for the development override
//! of `/assets/` and for extra routes declared in configuration.

use super::{with_index, Asset, PathHandler};
use crate::error::OpenError;
use crate::http::mime;
use crate::logger;
use crate::router::normalize_suffix;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirectoryHandler {
    /// Canonical root, every served file must resolve inside it
    root: PathBuf,
}

impl DirectoryHandler {
    /// Create a handler rooted at `root`, which must be an existing directory
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PathHandler for DirectoryHandler {
    fn open(&self, suffix: &str) -> Result<Asset, OpenError> {
        let Some(normalized) = normalize_suffix(suffix) else {
            return Err(OpenError::NotFound(suffix.to_string()));
        };
        let relative = with_index(&normalized);
        let file_path = self.root.join(relative.as_ref());

        // Missing files are common (404), no need to log them
        let Ok(canonical) = file_path.canonicalize() else {
            return Err(OpenError::NotFound(relative.into_owned()));
        };
        if !canonical.starts_with(&self.root) {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                suffix,
                canonical.display()
            ));
            return Err(OpenError::NotFound(relative.into_owned()));
        }
        if canonical.is_dir() {
            return Err(OpenError::NotFound(relative.into_owned()));
        }

        let file = File::open(&canonical).map_err(|source| OpenError::Unreadable {
            path: canonical.clone(),
            source,
        })?;
        let len = file.metadata().ok().map(|m| m.len());
        let extension = canonical.extension().and_then(|e| e.to_str());

        Ok(Asset {
            body: Box::new(file),
            mime_type: mime::get_content_type(extension),
            len,
        })
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Hi</h1>").unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/app.css"), "body{color:#333}").unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        dir
    }

    #[test]
    fn test_new_requires_directory() {
        let dir = site();
        assert!(DirectoryHandler::new(dir.path().join("index.html")).is_err());
        assert!(DirectoryHandler::new(dir.path().join("missing")).is_err());
        assert!(DirectoryHandler::new(dir.path()).is_ok());
    }

    #[test]
    fn test_open_file() {
        let dir = site();
        let handler = DirectoryHandler::new(dir.path()).unwrap();

        let asset = handler.open("css/app.css").unwrap();
        assert_eq!(asset.mime_type, "text/css");
        assert_eq!(asset.len, Some(16));
        assert_eq!(asset.read_to_vec().unwrap(), b"body{color:#333}");
    }

    #[test]
    fn test_directory_suffix() {
        let dir = site();
        let handler = DirectoryHandler::new(dir.path()).unwrap();

        assert_eq!(handler.open("").unwrap().mime_type, "text/html");
        assert!(matches!(handler.open("empty/"), Err(OpenError::NotFound(_))));
        assert!(matches!(handler.open("css"), Err(OpenError::NotFound(_))));
    }

    #[test]
    fn test_traversal_blocked() {
        let parent = tempfile::tempdir().unwrap();
        fs::write(parent.path().join("secret.txt"), "top secret").unwrap();
        let root = parent.path().join("www");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("index.html"), "ok").unwrap();

        let handler = DirectoryHandler::new(&root).unwrap();
        assert!(handler.open("../secret.txt").is_err());
        assert!(handler.open("index.html/../../secret.txt").is_err());
        assert!(handler.open("index.html").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_blocked() {
        let parent = tempfile::tempdir().unwrap();
        fs::write(parent.path().join("secret.txt"), "top secret").unwrap();
        let root = parent.path().join("www");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(parent.path().join("secret.txt"), root.join("link.txt")).unwrap();

        let handler = DirectoryHandler::new(&root).unwrap();
        assert!(matches!(handler.open("link.txt"), Err(OpenError::NotFound(_))));
    }
}
