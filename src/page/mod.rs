// src/page/mod.rs
// =============================================================================
// Everything about getting a page and reading targets out of it.
//
// Submodules:
// - fetch: the HTTP side - one shared client, page fetches, image byte
//   fetches
// - extract: the parsing side - pulling absolute anchor and image URLs out
//   of an HTML document
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `page::fetch_page(...)` without knowing the internal
// file layout.
// =============================================================================

mod extract;
mod fetch;

pub use extract::{extract_targets, PageTargets};
pub use fetch::{build_client, fetch_bytes, fetch_page, PageDocument};
