// src/crawl/registry.rs
// =============================================================================
// The dedup registry: which pages and which images have already been claimed.
//
// Every worker shares one registry instance. A "claim" hands responsibility
// for a URL to exactly one caller: the first claim_page / claim_image call
// for a value returns true, every later call for the same value returns
// false, no matter how many workers race on it.
//
// The whole trick is that HashSet::insert is already an atomic
// check-and-insert while the mutex is held. There is deliberately no
// separate contains() check anywhere - a "contains, then add" sequence
// would open a window where two workers both see "not present" and both
// proceed.
//
// Pages and images live in disjoint sets: the same URL may be claimed once
// as a page and once as an image without conflict. The registry only ever
// grows; nothing is removed for the lifetime of a run.
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct VisitRegistry {
    pages: Mutex<HashSet<String>>,
    images: Mutex<HashSet<String>>,
}

impl VisitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Claims a page URL for fetching
    //
    // Returns true iff this call is the first claim of this exact URL
    // string across the whole run.
    pub fn claim_page(&self, url: &str) -> bool {
        // The lock is only poisoned if a claimant panicked mid-insert
        self.pages.lock().unwrap().insert(url.to_string())
    }

    // Claims an image URL for downloading
    //
    // Same contract as claim_page, over a disjoint namespace.
    pub fn claim_image(&self, url: &str) -> bool {
        self.images.lock().unwrap().insert(url.to_string())
    }
}
