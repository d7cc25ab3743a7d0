// src/page/fetch.rs
// =============================================================================
// The HTTP side of the crawler.
//
// One reqwest client is built up front and shared by every worker
// (connection pooling comes for free that way). Two fetch shapes exist:
//
// - fetch_page: GET a page, give back its HTML plus the URL the response
//   actually came from - redirects are followed transparently, and later
//   link resolution must be anchored on the final URL, not the requested
//   one.
// - fetch_bytes: GET an image, give back the raw bytes plus the declared
//   content type (when the server sent one).
//
// Both return errors instead of panicking; a failed fetch means "this
// target could not be processed", never "stop the crawl".
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

// A fetched page, ready for extraction
#[derive(Debug, Clone)]
pub struct PageDocument {
    /// The final URL after redirects - the base for resolving links
    pub url: String,
    /// The raw HTML body
    pub html: String,
}

// Builds the shared HTTP client
//
// The User-Agent, when configured, is attached here so every request sends
// it without each call site having to remember.
pub fn build_client(user_agent: Option<&str>) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(agent) = user_agent {
        builder = builder.user_agent(agent.to_string());
    }

    builder.build().context("failed to build HTTP client")
}

// Fetches one page and returns its HTML
//
// Non-2xx responses are errors: an error page is not worth parsing for
// links or images.
pub async fn fetch_page(client: &Client, url: &str) -> Result<PageDocument> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let final_url = response.url().to_string();
    let html = response.text().await?;

    Ok(PageDocument {
        url: final_url,
        html,
    })
}

// Fetches one image and returns its bytes plus the declared content type
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<(Vec<u8>, Option<String>)> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let bytes = response.bytes().await?.to_vec();

    Ok((bytes, content_type))
}
