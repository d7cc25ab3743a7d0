// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (clap itself prints usage and
//    bails before any network activity when they are malformed)
// 2. Build the immutable CrawlConfig, the shared dedup registry and the
//    image store
// 3. Run the crawl to completion, with Ctrl-C wired to a cooperative stop
//    flag
// 4. Print the summary and exit
//
// Exit codes:
//   0 = the crawl ran to completion (individual page/image failures are
//       logged, not fatal)
//   2 = configuration error (bad seed URL, unusable HTTP client), reported
//       before anything was fetched
// =============================================================================

use anyhow::Result;
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use imgcrawl::cli::Cli;
use imgcrawl::config::CrawlConfig;
use imgcrawl::crawl::{self, CrawlSummary, VisitRegistry};
use imgcrawl::store::ImageStore;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = CrawlConfig::from_cli(&cli);

    println!(
        "🔍 Crawling {} seed URL(s) with {} worker(s)",
        config.seeds.len(),
        config.workers
    );
    println!("📁 Output directory: {}", config.output_dir.display());

    // One registry and one store for the whole run, shared by every worker
    let registry = Arc::new(VisitRegistry::new());
    let store = Arc::new(ImageStore::new(&config.output_dir));

    // Ctrl-C flips the stop flag; the engine drains in-flight work and
    // returns instead of being killed mid-write
    let stop = Arc::new(AtomicBool::new(false));
    let stop_signal = Arc::clone(&stop);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nStop requested, finishing in-flight work...");
            stop_signal.store(true, Ordering::Relaxed);
        }
    });

    let summary = crawl::run_crawl(&config, registry, store, stop).await?;

    print_summary(&summary, cli.json)?;

    // Per-page and per-image failures were already logged; a finished
    // crawl exits zero regardless
    Ok(0)
}

// Prints the final summary either as a table or as JSON
fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Summary:");
    println!(
        "   📄 Pages crawled: {} (failed: {})",
        summary.pages_crawled, summary.pages_failed
    );
    println!("   🖼️  Images saved: {}", summary.images_saved);
    println!("   ⏭️  Images skipped: {}", summary.images_skipped);
    println!("   ⚠️  Image failures: {}", summary.images_failed);
    Ok(())
}
