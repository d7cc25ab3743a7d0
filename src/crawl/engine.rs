// src/crawl/engine.rs
// =============================================================================
// The frontier and the worker pool - the heart of the crawler.
//
// How it works:
// 1. Every seed is claimed in the dedup registry and pushed into the job
//    channel (seeds enter the run already Claimed).
// 2. A fixed pool of N workers consumes claimed jobs concurrently. Each
//    worker fetches the page, downloads the images it can claim, and
//    classifies the page's anchors against the job's scope.
// 3. Workers never enqueue links themselves. They report classified
//    candidates back to the coordinator, which claims each one and feeds
//    the winners into the same job channel. Discovered links re-enter the
//    pool instead of being followed inline, so an arbitrarily deep link
//    graph costs frontier memory, not call-stack depth.
// 4. The coordinator keeps the active-task counter: +1 for every job
//    submitted, -1 for every outcome received. Zero means the frontier is
//    empty AND no worker is mid-flight - that is the termination
//    condition. A bare "queue empty" check cannot distinguish "done" from
//    "a worker is about to discover thirty more links", which is exactly
//    the race the counter exists to close.
//
// Per-target life cycle: Discovered -> Claimed (registry win) -> Fetching
// -> Parsed or FetchFailed. Lost claims and fetch failures are terminal
// no-ops; nothing is ever retried and no failure aborts the run.
//
// Multiple seeds share this one pool; every job carries the scope filter
// of the seed it descends from.
// =============================================================================

use anyhow::{Context, Result};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::CrawlConfig;
use crate::crawl::registry::VisitRegistry;
use crate::crawl::scope::{classify_links, ScopeFilter};
use crate::crawl::stats::{CrawlStats, CrawlSummary};
use crate::images::select_destination;
use crate::page::{build_client, extract_targets, fetch_bytes, fetch_page};
use crate::store::ImageStore;

// One claimed page waiting to be fetched, tied to the scope of the seed it
// was discovered under
struct CrawlJob {
    url: String,
    scope: Arc<ScopeFilter>,
}

// What a worker reports back when it finishes a job: the in-scope,
// well-formed candidates it found (empty on fetch failure). Claiming them
// is the coordinator's job.
struct PageOutcome {
    scope: Arc<ScopeFilter>,
    discovered: Vec<String>,
}

// Everything a worker needs, cloned once per job
//
// Only the registry (and the stats tallies) are ever mutated from several
// workers at once; the fetched document and extracted targets stay owned
// by the worker that produced them.
#[derive(Clone)]
struct WorkerContext {
    client: reqwest::Client,
    registry: Arc<VisitRegistry>,
    store: Arc<ImageStore>,
    image_formats: Arc<Vec<String>>,
    stats: Arc<CrawlStats>,
    outcomes: mpsc::UnboundedSender<PageOutcome>,
}

// Runs the whole crawl to completion and returns the final tallies
//
// Parameters:
//   config: the immutable crawl configuration
//   registry: the shared dedup registry (injected so tests get isolated
//             instances)
//   store: the "persist these bytes under this name" capability
//   stop: cooperative stop flag; once set, no newly discovered links are
//         admitted and the run drains cleanly
//
// Errors only surface for configuration-class problems (an unparseable
// seed, a client that cannot be built) - and those are reported before any
// network activity. Per-page and per-image failures are logged and
// absorbed.
pub async fn run_crawl(
    config: &CrawlConfig,
    registry: Arc<VisitRegistry>,
    store: Arc<ImageStore>,
    stop: Arc<AtomicBool>,
) -> Result<CrawlSummary> {
    // Validate every seed up front: a bad seed is a fatal configuration
    // error, not a crawl-time warning
    let scopes = config
        .seeds
        .iter()
        .map(|seed| ScopeFilter::new(seed))
        .collect::<Result<Vec<_>>>()?;

    let client = build_client(config.user_agent.as_deref())?;
    let stats = Arc::new(CrawlStats::new());

    // Jobs flow coordinator -> workers, outcomes flow back
    let (job_tx, job_rx) = mpsc::unbounded_channel::<CrawlJob>();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<PageOutcome>();

    let context = WorkerContext {
        client,
        registry: Arc::clone(&registry),
        store,
        image_formats: Arc::new(config.image_formats.clone()),
        stats: Arc::clone(&stats),
        outcomes: outcome_tx,
    };

    // The worker pool: up to `workers` jobs in flight at once. The stream
    // ends when the job channel closes, which the coordinator does once
    // the active-task counter hits zero.
    let workers = config.workers;
    let pool = tokio::spawn(async move {
        UnboundedReceiverStream::new(job_rx)
            .for_each_concurrent(workers, |job| {
                let context = context.clone();
                async move { process_page(context, job).await }
            })
            .await;
    });

    // Inject the seeds: each one is claimed directly, skipping Discovered
    let mut pending: usize = 0;
    for scope in scopes {
        let url = scope.anchor().to_string();
        if registry.claim_page(&url) {
            pending += 1;
            if job_tx
                .send(CrawlJob {
                    url,
                    scope: Arc::new(scope),
                })
                .is_err()
            {
                pending -= 1;
            }
        }
    }

    // The coordinator: the active-task counter drives termination.
    // Receiving an outcome is the -1; every claim-and-submit is a +1.
    while pending > 0 {
        let outcome = match outcome_rx.recv().await {
            Some(outcome) => outcome,
            // All workers gone mid-run; nothing more will arrive
            None => break,
        };
        pending -= 1;

        // A requested stop drains in-flight work but admits nothing new
        if stop.load(Ordering::Relaxed) {
            continue;
        }

        for link in outcome.discovered {
            // The claim is the Discovered -> Claimed transition; losers
            // are dropped here and never reach the frontier
            if registry.claim_page(&link) {
                pending += 1;
                if job_tx
                    .send(CrawlJob {
                        url: link,
                        scope: Arc::clone(&outcome.scope),
                    })
                    .is_err()
                {
                    pending -= 1;
                }
            }
        }
    }

    // Closing the job channel lets the pool stream run dry and finish
    drop(job_tx);
    pool.await.context("worker pool task failed")?;

    Ok(stats.snapshot())
}

// One fetch -> parse -> extract -> dispatch cycle
//
// Fetch failures mark the target FetchFailed: logged, no retry, the rest
// of the crawl is unaffected. On success the images are handled first,
// then the anchors are classified and reported back for re-entry into the
// pool.
async fn process_page(context: WorkerContext, job: CrawlJob) {
    println!("Crawling page: {}", job.url);

    let discovered = match fetch_page(&context.client, &job.url).await {
        Ok(document) => {
            // Extraction is synchronous and complete before the first
            // image download starts; the parsed document never crosses an
            // await
            let targets = extract_targets(&document.html, &document.url);

            for src in targets.images {
                // Exactly one worker wins each image URL across the run
                if context.registry.claim_image(&src) {
                    download_image(&context, &src).await;
                }
            }

            context.stats.page_crawled();
            classify_links(targets.anchors, &job.scope)
        }
        Err(error) => {
            eprintln!("  Warning: failed to fetch {}: {}", job.url, error);
            context.stats.page_failed();
            Vec::new()
        }
    };

    // If the coordinator is already gone the crawl is over and the report
    // has no audience
    let _ = context.outcomes.send(PageOutcome {
        scope: job.scope,
        discovered,
    });
}

// Downloads one claimed image, runs the selector, persists the bytes
//
// Every failure here is local to this image: log, count, move on.
async fn download_image(context: &WorkerContext, src: &str) {
    let (bytes, content_type) = match fetch_bytes(&context.client, src).await {
        Ok(fetched) => fetched,
        Err(error) => {
            eprintln!("  Warning: failed to download image {}: {}", src, error);
            context.stats.image_failed();
            return;
        }
    };

    let name = match select_destination(src, content_type.as_deref(), &context.image_formats) {
        Some(name) => name,
        None => {
            context.stats.image_skipped();
            return;
        }
    };

    match context.store.persist(&name, &bytes).await {
        Ok(path) => {
            println!("  Saved image: {}", path.display());
            context.stats.image_saved();
        }
        Err(error) => {
            eprintln!("  Warning: could not save image {}: {}", name, error);
            context.stats.image_failed();
        }
    }
}
