// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and validate them into a config
// 2. Crawl the site (Ctrl-C stops the crawl early; collected pages are kept)
// 3. Print a summary (and the JSON report with --json)
// 4. Render the collected pages to a PDF
// 5. Exit with proper code (0 = success, 2 = configuration or render error)
//
// Per-page fetch failures are logged and never change the exit code.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod logging;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use cli::Cli;
use crawl::{CrawlRun, PageRecord};
use error::FetchError;
use fetch::ReqwestFetcher;
use render::{PdfRenderer, Renderer};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// What --json prints
#[derive(Serialize)]
struct CrawlReport<'a> {
    base_url: &'a str,
    visited: usize,
    pages: &'a [PageRecord],
    failures: &'a [FetchError],
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.to_config().context("invalid configuration")?;
    let fetcher = ReqwestFetcher::new(&config).context("invalid configuration")?;
    let authority = config.origin_authority.clone();

    // with --json, stdout is reserved for the report
    let say = |line: String| {
        if cli.json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    say(format!("🔍 Crawling website: {}", config.base_url));
    say(format!(
        "📊 Max pages: {}, max depth: {}",
        config.max_pages, config.max_depth
    ));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight requests");
            on_interrupt.cancel();
        }
    });

    let mut crawl = CrawlRun::new(config, fetcher);
    crawl.start(&cancel).await?;
    debug!(status = ?crawl.status(), "crawl run finished");

    say(format!(
        "📄 Visited {} page(s), collected text from {} ({} failed)",
        crawl.visited().len(),
        crawl.pages().len(),
        crawl.failures().len()
    ));
    if cancel.is_cancelled() && !crawl.frontier().is_empty() {
        say(format!(
            "⏹️  Stopped early, {} discovered page(s) not visited",
            crawl.frontier().len()
        ));
    }

    if cli.json {
        let report = CrawlReport {
            base_url: crawl.config().base_url.as_str(),
            visited: crawl.visited().len(),
            pages: crawl.pages(),
            failures: crawl.failures(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if crawl.pages().is_empty() {
        warn!("no page text was collected; the document will be empty");
    }

    let path = render::output_path(cli.output.as_deref(), &authority);
    PdfRenderer::new(format!("{} website content", authority))
        .render(crawl.pages(), &path)
        .with_context(|| format!("failed to render {}", path.display()))?;

    say(format!("✅ PDF created: {}", path.display()));
    Ok(0)
}
