// src/crawl/stats.rs
// =============================================================================
// Crawl counters and the summary reported when the run finishes.
//
// Workers bump these counters concurrently while the crawl runs, so they
// are atomics behind a shared Arc. Relaxed ordering is enough: the numbers
// are tallies, nothing synchronizes on them. snapshot() freezes them into
// a plain struct for printing (or JSON output with --json).
// =============================================================================

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

// Live counters, shared across every worker
#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_crawled: AtomicUsize,
    pages_failed: AtomicUsize,
    images_saved: AtomicUsize,
    images_skipped: AtomicUsize,
    images_failed: AtomicUsize,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page was fetched and parsed
    pub fn page_crawled(&self) {
        self.pages_crawled.fetch_add(1, Ordering::Relaxed);
    }

    /// A page fetch or parse failed
    pub fn page_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// An image was downloaded and written out
    pub fn image_saved(&self) {
        self.images_saved.fetch_add(1, Ordering::Relaxed);
    }

    /// An image was rejected by the selector (format filter, unnameable)
    pub fn image_skipped(&self) {
        self.images_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// An image download or file write failed
    pub fn image_failed(&self) {
        self.images_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Freezes the current counts into a reportable summary
    pub fn snapshot(&self) -> CrawlSummary {
        CrawlSummary {
            pages_crawled: self.pages_crawled.load(Ordering::Relaxed),
            pages_failed: self.pages_failed.load(Ordering::Relaxed),
            images_saved: self.images_saved.load(Ordering::Relaxed),
            images_skipped: self.images_skipped.load(Ordering::Relaxed),
            images_failed: self.images_failed.load(Ordering::Relaxed),
        }
    }
}

// The final report of a crawl run
//
// Serialize/Deserialize so --json can print it as machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSummary {
    /// Pages fetched and parsed successfully
    pub pages_crawled: usize,
    /// Pages that could not be fetched or parsed
    pub pages_failed: usize,
    /// Images downloaded and written to the output directory
    pub images_saved: usize,
    /// Images rejected by the format filter or unnameable
    pub images_skipped: usize,
    /// Images whose download or write failed
    pub images_failed: usize,
}
