// src/crawl/classify.rs
// =============================================================================
// Decides whether a discovered URL belongs to the crawl.
//
// A URL is in scope when:
// 1. Its authority (host + port) is exactly the origin's authority
//    (no subdomains, no www. folding)
// 2. Its path does not end with an excluded file extension
//
// Everything here is a pure function: no state, no network.
// =============================================================================

use std::collections::BTreeSet;
use url::Url;

/// Returns the authority of a URL: the host, plus `:port` when a
/// non-default port is given. URLs without a host have no authority.
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Checks whether `candidate` should be crawled.
///
/// Malformed URLs are simply out of scope.
///
/// Examples:
///   ("http://example.com/a.pdf", "example.com", {".pdf"}) -> false
///   ("http://example.com/page",  "example.com", {".pdf"}) -> true
///   ("http://other.com/page",    "example.com", {})       -> false
pub fn is_in_scope(
    candidate: &str,
    origin_authority: &str,
    excluded_extensions: &BTreeSet<String>,
) -> bool {
    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if authority(&url).as_deref() != Some(origin_authority) {
        return false;
    }

    let path = url.path().to_ascii_lowercase();
    !excluded_extensions.iter().any(|ext| path.ends_with(ext.as_str()))
}
