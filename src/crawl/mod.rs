// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - classify: is a URL on the same site and not an excluded file type?
// - links: anchor discovery and relative URL resolution
// - frontier: the FIFO queue of pending URLs with duplicate suppression
// - engine: the traversal loop (sequential or with a worker pool)
// =============================================================================

mod classify;
mod engine;
mod frontier;
mod links;

pub use classify::authority;
pub use engine::{CrawlRun, PageRecord, RunStatus};
