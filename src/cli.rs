// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There are no subcommands here: the tool does exactly one thing (crawl and
// download images), so every option hangs directly off the binary.
// clap also takes care of --help and of rejecting missing/malformed
// arguments with a usage message before any network activity happens.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "imgcrawl",
    version = "0.1.0",
    about = "Crawl a website and download every image it can reach",
    long_about = "imgcrawl follows links from the seed URLs without leaving their scope and \
                  downloads each embedded image exactly once. Pages are never fetched twice, \
                  images are never downloaded twice, and individual failures never stop the crawl."
)]
pub struct Cli {
    /// Seed URLs to crawl, comma-separated
    ///
    /// Each seed anchors its own scope: links are only followed while their
    /// absolute form stays within the seed they were discovered under.
    #[arg(long = "url", value_name = "URL,URL,...", value_delimiter = ',', required = true)]
    pub urls: Vec<String>,

    /// Directory where downloaded images are written
    ///
    /// Defaults to the current working directory.
    #[arg(long, value_name = "path")]
    pub output_dir: Option<PathBuf>,

    /// Image formats to accept, comma-separated, case-insensitive
    ///
    /// When given, only images whose content type derives to one of these
    /// extensions are kept (e.g. --image-format png,jpg). When omitted,
    /// every image is accepted.
    #[arg(long = "image-format", value_name = "fmt,fmt,...", value_delimiter = ',')]
    pub image_formats: Vec<String>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "string")]
    pub user_agent: Option<String>,

    /// Number of concurrent crawl workers
    #[arg(long, default_value_t = 5)]
    pub workers: usize,

    /// Print the final crawl summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
