// src/error.rs
// =============================================================================
// Error types shared by the crawler, the fetcher and the renderer.
//
// Taxonomy:
// - ConfigError: bad input supplied before the crawl starts (fatal)
// - FetchError: one URL could not be fetched (recovered, crawl continues)
// - RenderError: the output document could not be written (fatal, reported last)
// - CrawlError: misuse of a crawl run (e.g. starting it twice)
//
// main.rs wraps these in anyhow::Error; everything below main uses the typed
// versions so callers can match on them.
// =============================================================================

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::crawl::RunStatus;

/// Invalid input detected while building a `CrawlConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL has no host: {0}")]
    MissingHost(String),

    #[error("max pages must be greater than 0")]
    ZeroMaxPages,

    #[error("worker count must be greater than 0")]
    ZeroWorkers,

    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single fetch failed.
///
/// The crawl engine never branches on this; it exists for logs and the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    HttpStatus(u16),
    TooManyRedirects,
    Dns,
    Ssl,
    Connect,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "HTTP {}", code),
            FailureKind::TooManyRedirects => write!(f, "too many redirects"),
            FailureKind::Dns => write!(f, "DNS error"),
            FailureKind::Ssl => write!(f, "SSL error"),
            FailureKind::Connect => write!(f, "connection failed"),
            FailureKind::Other => write!(f, "error"),
        }
    }
}

/// A failed fetch of one URL.
#[derive(Debug, Clone, Error, Serialize)]
#[error("failed to fetch {url}: {kind} ({message})")]
pub struct FetchError {
    pub url: String,
    #[serde(flatten)]
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Failure while producing the output document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrawlError {
    #[error("crawl run cannot be started from the {0:?} state")]
    NotIdle(RunStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::new("https://example.com/a", FailureKind::HttpStatus(404), "Not Found");
        assert_eq!(
            err.to_string(),
            "failed to fetch https://example.com/a: HTTP 404 (Not Found)"
        );
    }

    #[test]
    fn test_fetch_error_serializes_kind() {
        let err = FetchError::new("https://example.com/a", FailureKind::Timeout, "timed out");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "timeout");
        assert_eq!(json["url"], "https://example.com/a");

        let err = FetchError::new("https://example.com/b", FailureKind::HttpStatus(500), "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "http_status");
        assert_eq!(json["status"], 500);
    }
}
