// src/config.rs
// =============================================================================
// The immutable crawl configuration.
//
// CrawlConfig is built once from the parsed CLI arguments before the engine
// starts and is never mutated afterwards. Defaults are applied here (output
// directory, worker count) so the rest of the code never has to ask "was
// this flag given?".
// =============================================================================

use crate::cli::Cli;
use std::path::PathBuf;

// Fallback worker-pool size when --workers is not usable
pub const DEFAULT_WORKERS: usize = 5;

// Everything the crawl engine needs to know, resolved up front
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URLs, in the order they were given
    pub seeds: Vec<String>,
    /// Where downloaded images land (default: current working directory)
    pub output_dir: PathBuf,
    /// Optional User-Agent header value for every request
    pub user_agent: Option<String>,
    /// Allow-list of image format tokens, lowercased; empty means accept all
    pub image_formats: Vec<String>,
    /// Size of the worker pool, always at least 1
    pub workers: usize,
}

impl CrawlConfig {
    // Builds the configuration from parsed CLI arguments
    //
    // Format tokens are lowercased once here so the image selector can
    // compare them without caring about the case the user typed.
    pub fn from_cli(cli: &Cli) -> Self {
        let image_formats = cli
            .image_formats
            .iter()
            .map(|f| f.trim().to_ascii_lowercase())
            .filter(|f| !f.is_empty())
            .collect();

        Self {
            seeds: cli.urls.clone(),
            output_dir: cli
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            user_agent: cli.user_agent.clone(),
            image_formats,
            workers: if cli.workers == 0 {
                DEFAULT_WORKERS
            } else {
                cli.workers
            },
        }
    }

    /// True when no allow-list was configured and every format is accepted
    pub fn accepts_all_formats(&self) -> bool {
        self.image_formats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_applied() {
        let cli = Cli::parse_from(["imgcrawl", "--url", "http://a.test/"]);
        let config = CrawlConfig::from_cli(&cli);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.workers, 5);
        assert!(config.accepts_all_formats());
    }

    #[test]
    fn test_formats_lowercased() {
        let cli = Cli::parse_from([
            "imgcrawl",
            "--url",
            "http://a.test/",
            "--image-format",
            "PNG, Jpg",
        ]);
        let config = CrawlConfig::from_cli(&cli);
        assert_eq!(config.image_formats, vec!["png", "jpg"]);
        assert!(!config.accepts_all_formats());
    }

    #[test]
    fn test_zero_workers_falls_back_to_default() {
        let cli = Cli::parse_from(["imgcrawl", "--url", "http://a.test/", "--workers", "0"]);
        let config = CrawlConfig::from_cli(&cli);
        assert_eq!(config.workers, DEFAULT_WORKERS);
    }
}
