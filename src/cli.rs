// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - count: crawl a site and count a word (runs as a background job that we
//   poll until it finishes)
// - crawl: only crawl, and list the pages found
//
// Limits are Options so that a settings file can provide them; a flag given
// on the command line always wins.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use word_score::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "word-score",
    version = "0.1.0",
    about = "Crawl a website and count how many times a word appears on it",
    long_about = "word-score crawls a website breadth-first from a starting URL, \
                  collects the pages it can reach and counts the whole-word, \
                  case-insensitive occurrences of a word across all of them."
)]
pub struct Cli {
    /// Print debug logs (same as RUST_LOG=word_score=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON settings file; command-line flags override its values
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count a word across the pages of a website
    ///
    /// Example: word-score count https://example.com rust --max-depth 2
    Count {
        /// URL to start crawling from (http or https)
        url: String,

        /// Word to count
        word: String,

        /// Maximum crawl depth (default: 1)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Number of pages counted at the same time (default: CPU count)
        #[arg(long)]
        workers: Option<usize>,

        #[command(flatten)]
        options: CommonOptions,
    },

    /// Crawl a website and list the pages found
    ///
    /// Example: word-score crawl https://example.com --max-pages 20
    Crawl {
        /// URL to start crawling from (http or https)
        url: String,

        /// Maximum crawl depth (default: 2)
        #[arg(long)]
        max_depth: Option<usize>,

        #[command(flatten)]
        options: CommonOptions,
    },
}

/// Flags shared by every subcommand
#[derive(Args, Debug)]
pub struct CommonOptions {
    /// Maximum number of pages to collect (default: 100)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,

    /// Do not verify TLS certificates (unsafe, for testing only)
    #[arg(long)]
    pub insecure: bool,
}

impl CommonOptions {
    /// Writes the flags that were given into `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(max_pages) = self.max_pages {
            settings.crawl.max_pages = max_pages;
        }
        if self.insecure {
            settings.fetch.accept_invalid_certs = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_count() {
        let cli = Cli::parse_from([
            "word-score", "count", "https://example.com", "rust", "--max-depth", "2", "--json",
        ]);
        match cli.command {
            Commands::Count { url, word, max_depth, workers, options } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(word, "rust");
                assert_eq!(max_depth, Some(2));
                assert_eq!(workers, None);
                assert!(options.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "word-score", "crawl", "https://example.com", "--max-pages", "7", "--insecure",
        ]);
        let Commands::Crawl { options, .. } = cli.command else {
            panic!("expected crawl");
        };

        let mut settings = Settings::default();
        options.apply(&mut settings);
        assert_eq!(settings.crawl.max_pages, 7);
        assert!(settings.fetch.accept_invalid_certs);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "word-score", "crawl", "https://example.com", "-v", "--config", "settings.json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("settings.json")));
    }
}
