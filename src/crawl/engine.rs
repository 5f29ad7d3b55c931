// src/crawl/engine.rs
// =============================================================================
// The crawl engine: breadth-first traversal of one website.
//
// How one iteration works:
// 1. Stop if the frontier is empty or max_pages URLs have been attempted
// 2. Pop the oldest frontier entry (FIFO = breadth-first)
// 3. Skip it if already visited or deeper than max_depth
// 4. Mark it visited and fetch it (a failed fetch is logged and still counts)
// 5. Extract the page text and keep a PageRecord if it isn't empty
// 6. Scan the page's anchors; queue in-scope, unseen URLs at depth + 1
// 7. Wait for the politeness delay
//
// Two ways to drive it:
// - workers == 1: strictly sequential, exact BFS order, a plain sleep between
//   fetches
// - workers > 1: K workers share the state behind one async Mutex. Claiming
//   an entry (dequeue + visited check-then-add + page ceiling) happens in a
//   single critical section, so no URL is fetched twice and max_pages is never
//   exceeded. Politeness becomes a shared rate limiter. Pages are recorded in
//   completion order, so the output is only approximately breadth-first.
//
// Per-page failures never end the run. Only cancellation, an empty frontier
// or the page ceiling does.
// =============================================================================

use futures::future::join_all;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use scraper::Html;
use serde::Serialize;
use std::collections::HashSet;
use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::classify::is_in_scope;
use super::frontier::{Frontier, FrontierEntry};
use super::links::{extract_anchor_targets, normalize_url};
use crate::config::CrawlConfig;
use crate::error::{CrawlError, FetchError};
use crate::extract::extract_text;
use crate::fetch::Fetcher;

/// Text collected from one successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    /// Link distance from the seed at which the page was discovered.
    pub depth: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
}

/// What a single traversal iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Fetched; carries whether a PageRecord was produced.
    Fetched { recorded: bool },
    Failed,
    /// Popped an entry that was already visited or too deep.
    Skipped,
    /// Nothing left to do: frontier empty or page ceiling reached.
    Finished,
}

// Result of trying to take work off the frontier
enum Claim {
    Ready(FrontierEntry),
    Skipped,
    Pending,
    Exhausted,
}

// Everything a run mutates. Owned by the run, or by the worker pool's Mutex.
#[derive(Debug, Default)]
struct CrawlState {
    frontier: Frontier,
    visited: HashSet<String>,
    pages: Vec<PageRecord>,
    failures: Vec<FetchError>,
    in_flight: usize,
}

impl CrawlState {
    // The only place the visited set grows; check-then-add in one call.
    fn claim(&mut self, max_pages: usize, max_depth: usize) -> Claim {
        if self.visited.len() >= max_pages {
            return Claim::Exhausted;
        }

        let entry = match self.frontier.pop() {
            Some(entry) => entry,
            None if self.in_flight > 0 => return Claim::Pending,
            None => return Claim::Exhausted,
        };

        if self.visited.contains(&entry.url) || entry.depth > max_depth {
            debug!(url = %entry.url, depth = entry.depth, "skipping frontier entry");
            return Claim::Skipped;
        }

        self.visited.insert(entry.url.clone());
        self.in_flight += 1;
        Claim::Ready(entry)
    }

    // Undoes a claim whose fetch was never sent.
    fn release(&mut self, entry: FrontierEntry) {
        self.in_flight -= 1;
        self.visited.remove(&entry.url);
        debug!(url = %entry.url, "claim released");
        self.frontier.push(entry);
    }

    fn enqueue(&mut self, candidates: Vec<String>, depth: usize) {
        for url in candidates {
            if self.visited.contains(&url) || self.frontier.contains(&url) {
                continue;
            }
            debug!(url = %url, depth, "queued");
            self.frontier.push(FrontierEntry { url, depth });
        }
    }

    fn finish(&mut self, entry: &FrontierEntry, processed: Result<ProcessedPage, FetchError>) -> Step {
        self.in_flight -= 1;
        match processed {
            Ok(page) => {
                let recorded = page.text.is_some();
                if let Some(text) = page.text {
                    self.pages.push(PageRecord {
                        url: entry.url.clone(),
                        depth: entry.depth,
                        text,
                    });
                }
                self.enqueue(page.links, entry.depth + 1);
                Step::Fetched { recorded }
            }
            Err(err) => {
                warn!(url = %entry.url, error = %err, "fetch failed");
                self.failures.push(err);
                Step::Failed
            }
        }
    }
}

// Extraction output of one page, computed without holding any lock
struct ProcessedPage {
    text: Option<String>,
    links: Vec<String>,
}

/// One crawl of one website.
pub struct CrawlRun<F> {
    config: CrawlConfig,
    fetcher: F,
    status: RunStatus,
    state: CrawlState,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl<F: Fetcher> CrawlRun<F> {
    /// Creates an idle run seeded with the base URL at depth 0.
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        let mut state = CrawlState::default();
        state.frontier.push(FrontierEntry {
            url: normalize_url(&config.base_url),
            depth: 0,
        });

        let limiter = Quota::with_period(config.delay).map(RateLimiter::direct);

        Self {
            config,
            fetcher,
            status: RunStatus::Idle,
            state,
            limiter,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Collected pages, in the order they were fetched.
    pub fn pages(&self) -> &[PageRecord] {
        &self.state.pages
    }

    pub fn failures(&self) -> &[FetchError] {
        &self.state.failures
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.state.visited
    }

    pub fn frontier(&self) -> &Frontier {
        &self.state.frontier
    }

    /// Runs the traversal to completion (or until `cancel` fires).
    ///
    /// Pages collected before a cancellation stay valid.
    pub async fn start(&mut self, cancel: &CancellationToken) -> Result<(), CrawlError> {
        if self.status != RunStatus::Idle {
            return Err(CrawlError::NotIdle(self.status));
        }
        self.status = RunStatus::Running;
        info!(
            base_url = %self.config.base_url,
            max_pages = self.config.max_pages,
            max_depth = self.config.max_depth,
            workers = self.config.workers,
            "crawl started"
        );

        if self.config.workers > 1 {
            self.run_pooled(cancel).await;
        } else {
            self.run_sequential(cancel).await;
        }

        self.status = RunStatus::Completed;
        info!(
            visited = self.state.visited.len(),
            pages = self.state.pages.len(),
            failures = self.state.failures.len(),
            unvisited = self.state.frontier.len(),
            "crawl completed"
        );
        Ok(())
    }

    /// Performs exactly one traversal iteration (without the politeness delay).
    pub async fn step(&mut self) -> Step {
        let entry = match self.state.claim(self.config.max_pages, self.config.max_depth) {
            Claim::Ready(entry) => entry,
            Claim::Skipped => return Step::Skipped,
            // nothing else runs concurrently here, so Pending can't happen
            Claim::Pending | Claim::Exhausted => return Step::Finished,
        };

        info!(url = %entry.url, depth = entry.depth, "fetching");
        let processed = self.fetch_and_process(&entry).await;
        self.state.finish(&entry, processed)
    }

    async fn run_sequential(&mut self, cancel: &CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                warn!("crawl cancelled");
                break;
            }

            match self.step().await {
                Step::Finished => break,
                Step::Skipped => continue,
                Step::Fetched { .. } | Step::Failed => {
                    if self.has_more_work() {
                        tokio::select! {
                            _ = tokio::time::sleep(self.config.delay) => {}
                            _ = cancel.cancelled() => {}
                        }
                    }
                }
            }
        }
    }

    async fn run_pooled(&mut self, cancel: &CancellationToken) {
        let shared = Shared {
            state: Mutex::new(std::mem::take(&mut self.state)),
            changed: Notify::new(),
        };

        let this = &*self;
        join_all((0..this.config.workers).map(|id| this.worker(id, &shared, cancel))).await;

        self.state = shared.state.into_inner();
        if cancel.is_cancelled() {
            warn!("crawl cancelled");
        }
    }

    async fn worker(&self, id: usize, shared: &Shared, cancel: &CancellationToken) {
        loop {
            let entry = loop {
                if cancel.is_cancelled() {
                    return;
                }

                let mut state = shared.state.lock().await;
                match state.claim(self.config.max_pages, self.config.max_depth) {
                    Claim::Ready(entry) => break entry,
                    Claim::Skipped => continue,
                    Claim::Exhausted => {
                        drop(state);
                        shared.changed.notify_waiters();
                        return;
                    }
                    Claim::Pending => {
                        // register before unlocking so a wakeup can't slip by
                        let changed = shared.changed.notified();
                        drop(state);
                        tokio::select! {
                            _ = changed => {}
                            _ = cancel.cancelled() => return,
                        }
                    }
                }
            };

            if let Some(limiter) = &self.limiter {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        shared.state.lock().await.release(entry);
                        shared.changed.notify_waiters();
                        return;
                    }
                    _ = limiter.until_ready() => {}
                }
            }

            info!(worker = id, url = %entry.url, depth = entry.depth, "fetching");
            let processed = self.fetch_and_process(&entry).await;

            shared.state.lock().await.finish(&entry, processed);
            shared.changed.notify_waiters();
        }
    }

    async fn fetch_and_process(&self, entry: &FrontierEntry) -> Result<ProcessedPage, FetchError> {
        let markup = self.fetcher.fetch(&entry.url).await?;
        Ok(self.process(entry, &markup))
    }

    // Extraction and link discovery for one fetched page.
    fn process(&self, entry: &FrontierEntry, markup: &str) -> ProcessedPage {
        let text = extract_text(markup);
        if text.is_empty() {
            debug!(url = %entry.url, "no text content");
        }

        // children of a page at max_depth would be too deep anyway
        let links = match Url::parse(&entry.url) {
            Ok(page_url) if entry.depth < self.config.max_depth => {
                let document = Html::parse_document(markup);
                extract_anchor_targets(&document, &page_url)
                    .into_iter()
                    .filter(|candidate| {
                        is_in_scope(
                            candidate,
                            &self.config.origin_authority,
                            &self.config.excluded_extensions,
                        )
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        ProcessedPage {
            text: (!text.is_empty()).then_some(text),
            links,
        }
    }

    fn has_more_work(&self) -> bool {
        !self.state.frontier.is_empty() && self.state.visited.len() < self.config.max_pages
    }
}

struct Shared {
    state: Mutex<CrawlState>,
    changed: Notify,
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is a failed URL still marked visited?
//    - Otherwise a page that links to a broken URL would requeue it on every
//      visit and the crawl could loop on it. Failures are final within a run.
//
// 2. Why does the visited set grow at claim time, before the fetch?
//    - With several workers, "is it visited?" and "mark it visited" must be
//      one atomic step or two workers could fetch the same URL.
//    - In sequential mode nothing runs between claim and fetch, so this is
//      the same as marking it right after the attempt.
//
// 3. Why does Notify work without lost wakeups?
//    - A Notified future created by notified() receives notify_waiters()
//      from the moment it exists, even before it is first polled. We create
//      it while still holding the state lock.
//
// 4. Why join_all instead of tokio::spawn?
//    - The workers borrow the run (config, fetcher, limiter). join_all polls
//      them concurrently on the current task without needing 'static data.
// -----------------------------------------------------------------------------
