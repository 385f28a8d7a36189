//! Read-only asset bundle compiled into the binary
//!
//! The table is generated by `build.rs` from the `assets/` directory.

/// One embedded file, `path` relative to the bundle root
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset {
    pub path: &'static str,
    pub bytes: &'static [u8],
}

include!(concat!(env!("OUT_DIR"), "/embedded_assets.rs"));

/// View over a static table of embedded assets
#[derive(Debug, Clone, Copy)]
pub struct Bundle {
    assets: &'static [EmbeddedAsset],
}

impl Bundle {
    pub const fn new(assets: &'static [EmbeddedAsset]) -> Self {
        Self { assets }
    }

    /// The assets shipped with this build
    pub fn shipped() -> Self {
        Self::new(EMBEDDED_ASSETS)
    }

    pub fn get(&self, path: &str) -> Option<&'static [u8]> {
        self.assets
            .iter()
            .find(|asset| asset.path == path)
            .map(|asset| asset.bytes)
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        let assets: &'static [EmbeddedAsset] = self.assets;
        assets.iter().map(|asset| asset.path)
    }

    pub const fn len(&self) -> usize {
        self.assets.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::shipped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_bundle_has_entry_point() {
        let bundle = Bundle::shipped();
        assert!(!bundle.is_empty());
        assert!(bundle.get("index.html").is_some());
        assert!(bundle.paths().all(|p| !p.starts_with('/') && !p.contains('\\')));
    }

    #[test]
    fn test_lookup_is_exact() {
        static TABLE: &[EmbeddedAsset] = &[EmbeddedAsset {
            path: "css/app.css",
            bytes: b"body{}",
        }];
        let bundle = Bundle::new(TABLE);
        assert_eq!(bundle.get("css/app.css"), Some(&b"body{}"[..]));
        assert_eq!(bundle.get("CSS/app.css"), None);
        assert_eq!(bundle.get("/css/app.css"), None);
    }
}
