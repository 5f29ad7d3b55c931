// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below IS the CLI definition, and each
// field becomes a positional argument or a --flag.
//
// The parsed Cli is turned into a validated CrawlConfig by to_config();
// clap only checks types, the config builder checks meaning (URL has a
// host, limits are positive, headers are legal).
// =============================================================================

use clap::Parser;
use std::time::Duration;

use crate::config::{CrawlConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_USER_AGENT};
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "site2pdf",
    version,
    about = "Crawl a website and collect its text into a PDF",
    long_about = "site2pdf crawls a single website breadth-first, starting from its homepage, \
                  stays on the same domain, and writes the visible text of every page it \
                  reaches into one paginated PDF document."
)]
pub struct Cli {
    /// Homepage URL to start crawling from (e.g., https://example.com)
    pub base_url: String,

    /// Maximum number of pages to fetch (failed fetches count too)
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Maximum link depth to follow (0 = only the homepage)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Delay between requests in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Number of concurrent fetch workers (1 = strict breadth-first order)
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Extra request header, e.g. -H "Accept-Language: en" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Additional file extension to skip, e.g. --exclude-ext .svg (repeatable)
    #[arg(long = "exclude-ext")]
    pub exclude_ext: Vec<String>,

    /// Don't skip the default file types (.pdf, .jpg, .js, ...); only --exclude-ext applies
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Output file name (".pdf" is appended if missing)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also print the crawl report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> Result<CrawlConfig, ConfigError> {
        let mut builder = CrawlConfig::builder(self.base_url.trim())
            .max_pages(self.max_pages)
            .max_depth(self.max_depth)
            .request_timeout(Duration::from_secs(self.timeout))
            .delay(Duration::from_millis(self.delay_ms))
            .workers(self.workers)
            .user_agent(self.user_agent.clone());

        for (name, value) in &self.headers {
            builder = builder.header(name.clone(), value.clone());
        }
        if self.no_default_excludes {
            builder = builder.excluded_extensions(Vec::<String>::new());
        }
        for ext in &self.exclude_ext {
            builder = builder.exclude_extension(ext.clone());
        }

        builder.build()
    }
}

// "Name: value" -> ("Name", "value")
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Vec<(String, String)> for headers?
//    - clap collects repeated flags into a Vec, and value_parser lets us
//      split each "Name: value" as it is parsed, so bad input is rejected
//      with a normal clap usage error.
//
// 2. Why are defaults constants from config.rs?
//    - The CLI and the builder must agree; one definition keeps them in sync.
// -----------------------------------------------------------------------------
