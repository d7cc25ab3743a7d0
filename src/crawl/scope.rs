// src/crawl/scope.rs
// =============================================================================
// The scope filter: which discovered links stay inside the crawl boundary.
//
// Each seed URL anchors its own scope. A candidate link is in scope when its
// absolute form contains the seed's normalized URL as a substring - note:
// substring containment, not hostname equality. A seed of
// "http://example.test/docs" therefore keeps "http://example.test/docs/a"
// but drops "http://example.test/blog", which plain same-host logic would
// have admitted.
//
// Classification is pure: it filters, it never claims. Handing the
// survivors to the dedup registry is the caller's job, so the same inputs
// always classify the same way regardless of crawl history.
// =============================================================================

use anyhow::{Context, Result};
use url::Url;

// The containment test for one seed, derived once and immutable afterwards
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    anchor: String,
}

impl ScopeFilter {
    // Builds the filter for one seed URL
    //
    // The seed is parsed and re-serialized so the anchor is in the same
    // normalized form the extractor produces for candidates (e.g.
    // "http://example.test" becomes "http://example.test/"). A seed that
    // does not parse as an absolute URL is a configuration error.
    pub fn new(seed: &str) -> Result<Self> {
        let parsed =
            Url::parse(seed).with_context(|| format!("invalid seed URL '{}'", seed))?;
        Ok(Self {
            anchor: parsed.to_string(),
        })
    }

    /// The normalized seed URL this scope is anchored on
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// True when the absolute URL stays within this scope
    pub fn in_scope(&self, absolute_url: &str) -> bool {
        absolute_url.contains(&self.anchor)
    }
}

// Filters a page's resolved anchors down to the ones eligible for the
// frontier
//
// Keeps a candidate only when it parses as an absolute URL and contains the
// scope anchor. Malformed candidates are dropped silently - they are noise,
// not errors.
pub fn classify_links(candidates: Vec<String>, scope: &ScopeFilter) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| Url::parse(candidate).is_ok() && scope.in_scope(candidate))
        .collect()
}
