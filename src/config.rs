// src/config.rs
// =============================================================================
// Crawl configuration.
//
// A CrawlConfig is immutable for the lifetime of a crawl run. It can only be
// produced by CrawlConfigBuilder::build(), which validates everything up front
// so that a bad base URL or a zero page limit fails before any network I/O.
// =============================================================================

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

use crate::crawl::authority;
use crate::error::ConfigError;

pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// File types that are never worth fetching for text.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".mp3", ".mp4", ".zip", ".rar", ".exe", ".css",
    ".js",
];

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: Url,
    /// Host plus explicit port of `base_url`, e.g. `example.com` or `localhost:8080`.
    pub origin_authority: String,
    pub max_pages: usize,
    pub max_depth: usize,
    pub request_timeout: Duration,
    pub delay: Duration,
    /// Lowercase, each starting with a dot.
    pub excluded_extensions: BTreeSet<String>,
    /// Sent with every request; always contains a User-Agent.
    pub headers: HeaderMap,
    pub workers: usize,
}

impl CrawlConfig {
    pub fn builder(base_url: impl Into<String>) -> CrawlConfigBuilder {
        CrawlConfigBuilder::new(base_url)
    }
}

#[derive(Debug, Clone)]
pub struct CrawlConfigBuilder {
    base_url: String,
    max_pages: usize,
    max_depth: usize,
    request_timeout: Duration,
    delay: Duration,
    excluded_extensions: Vec<String>,
    user_agent: String,
    headers: Vec<(String, String)>,
    workers: usize,
}

impl CrawlConfigBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            request_timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            workers: 1,
        }
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the whole exclusion list.
    pub fn excluded_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Adds to the exclusion list (e.g. `svg` or `.svg`).
    pub fn exclude_extension(mut self, extension: impl Into<String>) -> Self {
        self.excluded_extensions.push(extension.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn build(self) -> Result<CrawlConfig, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;

        let origin_authority =
            authority(&base_url).ok_or_else(|| ConfigError::MissingHost(self.base_url.clone()))?;

        if self.max_pages == 0 {
            return Err(ConfigError::ZeroMaxPages);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| ConfigError::InvalidHeader(format!("User-Agent: {}", self.user_agent)))?;
        headers.insert(USER_AGENT, user_agent);
        for (name, value) in &self.headers {
            let invalid = || ConfigError::InvalidHeader(format!("{}: {}", name, value));
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(name, value);
        }

        let excluded_extensions = self
            .excluded_extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| ext.len() > 1)
            .collect();

        Ok(CrawlConfig {
            base_url,
            origin_authority,
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            request_timeout: self.request_timeout,
            delay: self.delay,
            excluded_extensions,
            headers,
            workers: self.workers,
        })
    }
}

// "SVG" and ".svg" both become ".svg"
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
