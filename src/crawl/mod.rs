// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Submodules:
// - engine: frontier, worker pool, termination detection
// - registry: concurrency-safe page/image dedup claims
// - scope: per-seed scope filter and link classification
// - stats: shared counters and the final summary
//
// Re-exports give callers one flat API: build a VisitRegistry, hand it to
// run_crawl, read the CrawlSummary back.
// =============================================================================

mod engine;
mod registry;
mod scope;
mod stats;

pub use engine::run_crawl;
pub use registry::VisitRegistry;
pub use scope::{classify_links, ScopeFilter};
pub use stats::{CrawlStats, CrawlSummary};
