// src/page/extract.rs
// =============================================================================
// Pulling crawl targets out of an HTML document.
//
// One parse of the document yields both kinds of target at once:
// - anchors: every <a href> resolved to absolute form (scope filtering
//   happens later, in the classifier)
// - images: every <img src> resolved to absolute form
//
// Resolution anchors on the page's own URL, so relative hrefs behave the
// way a browser would treat them. Fragment-only links, mailto:/tel:/
// javascript: targets and anything that is not http(s) are dropped here.
//
// This is deliberately a synchronous function over &str: the parsed
// scraper::Html document is not Send, so it must never be held across an
// .await point. Parsing in here and returning plain Strings keeps the
// worker futures spawnable.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Both target lists extracted from one page
#[derive(Debug, Default)]
pub struct PageTargets {
    /// Absolute URLs of every followable anchor on the page
    pub anchors: Vec<String>,
    /// Absolute URLs of every image on the page
    pub images: Vec<String>,
}

// Extracts anchor and image targets from an HTML document
//
// Parameters:
//   html: the raw HTML
//   page_url: the URL the page was fetched from (for resolving relative
//             references)
//
// An unparseable page_url means nothing can be resolved - the page simply
// yields no targets.
pub fn extract_targets(html: &str, page_url: &str) -> PageTargets {
    let mut targets = PageTargets::default();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("  Warning: invalid page URL: {}", page_url);
            return targets;
        }
    };

    let document = Html::parse_document(html);

    // Both selectors are constants and known to be valid
    let anchor_selector = Selector::parse("a[href]").unwrap();
    let image_selector = Selector::parse("img[src]").unwrap();

    for element in document.select(&anchor_selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_url(&base, href) {
                targets.anchors.push(absolute);
            }
        }
    }

    for element in document.select(&image_selector) {
        if let Some(src) = element.value().attr("src") {
            if let Some(absolute) = resolve_url(&base, src) {
                targets.images.push(absolute);
            }
        }
    }

    targets
}

// Resolves a possibly-relative reference to an absolute http(s) URL
//
// Examples:
//   base = "http://example.test/page"
//   "/docs"               -> Some("http://example.test/docs")
//   "img/a.png"           -> Some("http://example.test/img/a.png")
//   "http://other.test/"  -> Some("http://other.test/")
//   "#section"            -> None
//   "mailto:a@b.test"     -> None
fn resolve_url(base: &Url, reference: &str) -> Option<String> {
    // Skip in-page anchors and non-fetchable schemes outright
    if reference.starts_with('#')
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("javascript:")
    {
        return None;
    }

    let resolved = base.join(reference).ok()?;

    // Only http(s) targets are fetchable by this crawler
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved.to_string())
    } else {
        None
    }
}
