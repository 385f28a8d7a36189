//! MIME type detection module
//!
//! Returns the MIME type for a file extension from a fixed table. Nothing is
//! sniffed from content, so the same path always yields the same type.

/// Fallback for unknown or missing extensions
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Get the MIME type for a file extension (case-insensitive)
///
/// # Examples
/// ```
/// use appassets_shell::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), "text/html");
/// assert_eq!(get_content_type(Some("WOFF2")), "font/woff2");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(extension) = extension else {
        return DEFAULT_MIME_TYPE;
    };

    match extension.to_ascii_lowercase().as_str() {
        // Text
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "txt" | "md" => "text/plain",
        "xml" => "application/xml",

        // JavaScript/WASM
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "webmanifest" => "application/manifest+json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "eot" => "application/vnd.ms-fontobject",

        // Documents
        "pdf" => "application/pdf",

        _ => DEFAULT_MIME_TYPE,
    }
}

/// Character encoding reported alongside textual MIME types
pub fn get_encoding(mime_type: &str) -> Option<&'static str> {
    let textual = mime_type.starts_with("text/")
        || matches!(
            mime_type,
            "application/javascript"
                | "application/json"
                | "application/manifest+json"
                | "application/xml"
                | "image/svg+xml"
        );
    textual.then_some("utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), "text/html");
        assert_eq!(get_content_type(Some("css")), "text/css");
        assert_eq!(get_content_type(Some("js")), "application/javascript");
        assert_eq!(get_content_type(Some("json")), "application/json");
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("svg")), "image/svg+xml");
        assert_eq!(get_content_type(Some("woff")), "font/woff");
    }

    #[test]
    fn test_extension_case() {
        assert_eq!(get_content_type(Some("HTML")), "text/html");
        assert_eq!(get_content_type(Some("Png")), "image/png");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }

    #[test]
    fn test_encoding() {
        assert_eq!(get_encoding("text/html"), Some("utf-8"));
        assert_eq!(get_encoding("application/javascript"), Some("utf-8"));
        assert_eq!(get_encoding("image/svg+xml"), Some("utf-8"));
        assert_eq!(get_encoding("image/png"), None);
        assert_eq!(get_encoding(DEFAULT_MIME_TYPE), None);
    }
}
