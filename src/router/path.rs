//! Path decoding and suffix normalization
//!
//! Everything that decides whether a suffix stays inside the bundle root lives
//! here, so handlers only ever see normalized, relative suffixes.

use std::borrow::Cow;
use std::fmt::Write as _;

/// Percent-decode a URL path
///
/// Returns `None` for malformed escapes or when the decoded bytes are not UTF-8.
pub fn percent_decode(input: &str) -> Option<String> {
    if !input.contains('%') {
        return Some(input.to_string());
    }

    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let high = bytes.next().and_then(hex_digit)?;
            let low = bytes.next().and_then(hex_digit)?;
            out.push(high << 4 | low);
        } else {
            out.push(b);
        }
    }
    String::from_utf8(out).ok()
}

/// Percent-encode the bytes a strict URI parser refuses
///
/// Covers control bytes, space, non-ASCII bytes, quotes, angle brackets,
/// braces, backslash, caret, pipe and backtick. Existing escapes and URI
/// delimiters are left alone, so decoding the result gives back the original
/// path text.
pub fn escape_unsafe(url: &str) -> Cow<'_, str> {
    if !url.bytes().any(needs_escape) {
        return Cow::Borrowed(url);
    }

    let mut out = String::with_capacity(url.len() + 8);
    for &b in url.as_bytes() {
        if needs_escape(b) {
            let _ = write!(out, "%{b:02X}");
        } else {
            out.push(char::from(b));
        }
    }
    Cow::Owned(out)
}

const fn needs_escape(b: u8) -> bool {
    b <= b' ' || b >= 0x7f || matches!(b, b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}')
}

/// Split `scheme://host` off a URL without validating the rest
///
/// Userinfo and port are stripped from the authority. Used only to decide
/// whether a URL nothing else can parse still claims the virtual origin.
pub fn split_origin(url: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = url.split_once("://")?;
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = if host_port.starts_with('[') {
        host_port.find(']').map_or(host_port, |end| &host_port[..=end])
    } else {
        host_port.split(':').next().unwrap_or_default()
    };
    Some((scheme, host))
}

const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Normalize a suffix relative to the bundle root
///
/// Empty and `.` segments are dropped, `..` removes the previous segment.
/// Returns `None` when a `..` would climb above the root, or when the suffix
/// contains a backslash or NUL byte. A trailing `/` is kept (and added when the
/// last segment was `.` or `..`) so directory-style requests stay recognizable.
pub fn normalize_suffix(raw: &str) -> Option<String> {
    if raw.contains(['\\', '\0']) {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s => segments.push(s),
        }
    }

    let mut normalized = segments.join("/");
    let last = raw.rsplit('/').next().unwrap_or_default();
    if !normalized.is_empty() && matches!(last, "" | "." | "..") {
        normalized.push('/');
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("/assets/a%20b.png").as_deref(), Some("/assets/a b.png"));
        assert_eq!(percent_decode("/assets/%2e%2E/x").as_deref(), Some("/assets/../x"));
        assert_eq!(percent_decode("/plain").as_deref(), Some("/plain"));
    }

    #[test]
    fn test_percent_decode_malformed() {
        assert_eq!(percent_decode("/assets/%zz"), None);
        assert_eq!(percent_decode("/assets/%2"), None);
        assert_eq!(percent_decode("/assets/%ff"), None);
    }

    #[test]
    fn test_escape_unsafe() {
        assert_eq!(escape_unsafe("/assets/index.html?v=1#top"), "/assets/index.html?v=1#top");
        assert_eq!(escape_unsafe("/assets/my file.png"), "/assets/my%20file.png");
        assert_eq!(escape_unsafe("/assets/a<b>.js"), "/assets/a%3Cb%3E.js");
        assert_eq!(escape_unsafe("/assets/`x`.css"), "/assets/%60x%60.css");
        assert_eq!(escape_unsafe("/assets/%20ok"), "/assets/%20ok");
        assert_eq!(escape_unsafe("/assets/é"), "/assets/%C3%A9");
    }

    #[test]
    fn test_escape_then_decode_restores_path() {
        let raw = "/assets/a b<c>`d`é.txt";
        assert_eq!(percent_decode(&escape_unsafe(raw)).as_deref(), Some(raw));
    }

    #[test]
    fn test_split_origin() {
        assert_eq!(
            split_origin("https://appassets.androidplatform.net/assets/x y"),
            Some(("https", "appassets.androidplatform.net"))
        );
        assert_eq!(
            split_origin("http://user@AppAssets.androidplatform.net:bad port/x"),
            Some(("http", "AppAssets.androidplatform.net"))
        );
        assert_eq!(split_origin("https://example.com?q"), Some(("https", "example.com")));
        assert_eq!(split_origin("/assets/index.html"), None);
    }

    #[test]
    fn test_normalize_plain() {
        assert_eq!(normalize_suffix("index.html").as_deref(), Some("index.html"));
        assert_eq!(normalize_suffix("/css//app.css").as_deref(), Some("css/app.css"));
        assert_eq!(normalize_suffix("./js/./app.js").as_deref(), Some("js/app.js"));
    }

    #[test]
    fn test_normalize_directories() {
        assert_eq!(normalize_suffix("").as_deref(), Some(""));
        assert_eq!(normalize_suffix("css/").as_deref(), Some("css/"));
        assert_eq!(normalize_suffix("css/.").as_deref(), Some("css/"));
        assert_eq!(normalize_suffix("css/img/..").as_deref(), Some("css/"));
        assert_eq!(normalize_suffix("css/..").as_deref(), Some(""));
    }

    #[test]
    fn test_normalize_dotdot_inside_root() {
        assert_eq!(normalize_suffix("css/../index.html").as_deref(), Some("index.html"));
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert_eq!(normalize_suffix("../../etc/passwd"), None);
        assert_eq!(normalize_suffix("css/../../secret"), None);
        assert_eq!(normalize_suffix(".."), None);
    }

    #[test]
    fn test_normalize_rejects_backslash_and_nul() {
        assert_eq!(normalize_suffix("..\\secret"), None);
        assert_eq!(normalize_suffix("index.html\0.png"), None);
    }
}
