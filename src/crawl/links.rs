// src/crawl/links.rs
// =============================================================================
// Finds the anchor targets on a fetched page.
//
// Every <a href="..."> is resolved against the page's own URL using the
// standard rules (absolute, scheme-relative, path-relative and fragment-only
// references all work through Url::join). Non-HTTP targets are dropped and
// fragments are removed so "page" and "page#top" count as one URL.
//
// Scope filtering (same domain, excluded extensions) is NOT done here; that
// is the classifier's job.
// =============================================================================

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("a[href] is a valid selector"));

// Returns absolute, fragment-free URLs in document order (duplicates kept)
pub fn extract_anchor_targets(document: &Html, page_url: &Url) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .collect()
}

// Resolves a possibly-relative href against the page URL
//
// Examples (page = https://example.com/docs/page):
//   "/about"            -> Some("https://example.com/about")
//   "next"              -> Some("https://example.com/docs/next")
//   "//example.com/x"   -> Some("https://example.com/x")
//   "#section"          -> Some("https://example.com/docs/page")
//   "mailto:a@b.c"      -> None
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let mut url = base.join(href.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url.to_string())
}

/// Canonical form of a URL for the visited set and the frontier.
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
