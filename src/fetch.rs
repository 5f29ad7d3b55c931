// src/fetch.rs
// =============================================================================
// Downloads pages for the crawler.
//
// The crawl engine only sees the Fetcher trait, so tests can swap in an
// in-memory fake. The real implementation wraps a single reqwest Client that
// is built once with the crawl's header set and timeout (connection pooling
// across all requests to the site).
//
// Any non-2xx status, timeout or transport failure becomes a FetchError.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;

use crate::config::CrawlConfig;
use crate::error::{ConfigError, FailureKind, FetchError};

const REDIRECT_LIMIT: usize = 10;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .default_headers(config.headers.clone())
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(REDIRECT_LIMIT))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                url,
                FailureKind::HttpStatus(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        // the body can still time out or be cut off mid-stream
        response.text().await.map_err(|e| categorize_error(url, e))
    }
}

// Maps reqwest's error flags onto our failure kinds
//
// reqwest doesn't expose DNS or TLS failures as separate flags, so those are
// recognized from the error text.
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let message = error.to_string();
    let detail = format!("{:?}", error).to_lowercase();

    let kind = if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_redirect() {
        FailureKind::TooManyRedirects
    } else if error.is_connect() {
        if detail.contains("dns") {
            FailureKind::Dns
        } else {
            FailureKind::Connect
        }
    } else if detail.contains("certificate") || detail.contains("ssl") || detail.contains("tls") {
        FailureKind::Ssl
    } else {
        FailureKind::Other
    };

    FetchError::new(url, kind, message)
}
