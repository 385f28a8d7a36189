//! Virtual-origin routing module
//!
//! Decides whether a request URL targets the virtual origin and, if so, which
//! path handler owns the remaining suffix:
//! - Origin check on scheme + host (host is case-insensitive)
//! - Longest literal prefix match on the decoded path (case-sensitive)
//! - Suffix normalization that refuses to leave the handler's root

mod path;
mod table;

pub use path::{escape_unsafe, normalize_suffix, percent_decode, split_origin};
pub use table::{Resolution, RouteEntry, RouteMatch, Router, RouterBuilder};
