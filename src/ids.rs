//! Identifier derivation from hrefs
//!
//! All functions here are pure: the same href always yields the same id,
//! regardless of which document it came from.

use regex::Regex;
use reqwest::Url;

/// Listing-path pattern: the segment(s) after `manga/`, trailing slash dropped
pub const LISTING_ID_PATTERN: &str = r"manga/(.*?)/?$";

/// Compile a pattern that is known at build time
pub fn pattern(re: &str) -> Regex {
    match Regex::new(re) {
        Ok(r) => r,
        Err(e) => panic!("invalid built-in pattern {re}: {e}"),
    }
}

/// First capture group of `re` over `href`
pub fn derive_id(href: &str, re: &Regex) -> Option<String> {
    re.captures(href)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Result-card id; empty when the href does not look like a listing URL
pub fn listing_id(href: &str, re: &Regex) -> String {
    derive_id(href, re).unwrap_or_default()
}

/// Resolve `href` against `base` and return its path without the leading slash
pub fn resolve_path_id(href: &str, base: &Url) -> Option<String> {
    let resolved = base.join(href).ok()?;
    let path = resolved.path();
    Some(path.strip_prefix('/').unwrap_or(path).to_string())
}
