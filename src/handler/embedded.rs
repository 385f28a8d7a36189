//! Embedded asset handler
//!
//! Serves suffixes from the bundle compiled into the binary. The bundle never
//! changes while the process runs, so every call simply looks the entry up again.

use super::{with_index, Asset, PathHandler};
use crate::bundle::Bundle;
use crate::error::OpenError;
use crate::http::mime;
use crate::router::normalize_suffix;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssetsHandler {
    bundle: Bundle,
}

impl EmbeddedAssetsHandler {
    /// Handler over the assets shipped with this build
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_bundle(bundle: Bundle) -> Self {
        Self { bundle }
    }

    pub const fn bundle(&self) -> &Bundle {
        &self.bundle
    }
}

impl PathHandler for EmbeddedAssetsHandler {
    fn open(&self, suffix: &str) -> Result<Asset, OpenError> {
        let Some(normalized) = normalize_suffix(suffix) else {
            return Err(OpenError::NotFound(suffix.to_string()));
        };
        let path = with_index(&normalized);

        let bytes = self
            .bundle
            .get(&path)
            .ok_or_else(|| OpenError::NotFound(path.to_string()))?;

        let extension = Path::new(path.as_ref()).extension().and_then(|e| e.to_str());
        Ok(Asset::from_static(bytes, mime::get_content_type(extension)))
    }

    fn name(&self) -> &'static str {
        "embedded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::EmbeddedAsset;

    static TABLE: &[EmbeddedAsset] = &[
        EmbeddedAsset {
            path: "index.html",
            bytes: b"<h1>root</h1>",
        },
        EmbeddedAsset {
            path: "css/app.css",
            bytes: b"body{}",
        },
        EmbeddedAsset {
            path: "docs/index.html",
            bytes: b"<h1>docs</h1>",
        },
        EmbeddedAsset {
            path: "fonts/brand.woff",
            bytes: b"wOFF",
        },
        EmbeddedAsset {
            path: "LICENSE",
            bytes: b"MIT",
        },
    ];

    fn handler() -> EmbeddedAssetsHandler {
        EmbeddedAssetsHandler::with_bundle(Bundle::new(TABLE))
    }

    #[test]
    fn test_open_index() {
        let asset = handler().open("index.html").unwrap();
        assert_eq!(asset.mime_type, "text/html");
        assert_eq!(asset.len, Some(13));
        assert_eq!(asset.read_to_vec().unwrap(), b"<h1>root</h1>");
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(handler().open("css/app.css").unwrap().mime_type, "text/css");
        assert_eq!(handler().open("fonts/brand.woff").unwrap().mime_type, "font/woff");
        assert_eq!(
            handler().open("LICENSE").unwrap().mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_directory_suffix_uses_index() {
        let root = handler().open("").unwrap();
        assert_eq!(root.read_to_vec().unwrap(), b"<h1>root</h1>");

        let docs = handler().open("docs/").unwrap();
        assert_eq!(docs.read_to_vec().unwrap(), b"<h1>docs</h1>");

        assert!(matches!(handler().open("css/"), Err(OpenError::NotFound(p)) if p == "css/index.html"));
    }

    #[test]
    fn test_missing_entry() {
        assert!(matches!(handler().open("nope.js"), Err(OpenError::NotFound(_))));
    }

    #[test]
    fn test_traversal_never_opens() {
        assert!(matches!(
            handler().open("../../etc/passwd"),
            Err(OpenError::NotFound(_))
        ));
        assert!(matches!(
            handler().open("css/../../index.html"),
            Err(OpenError::NotFound(_))
        ));
    }

    #[test]
    fn test_shipped_index_is_html() {
        let asset = EmbeddedAssetsHandler::new().open("index.html").unwrap();
        assert_eq!(asset.mime_type, "text/html");
    }
}
