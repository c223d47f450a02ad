// src/lib.rs
// =============================================================================
// word-score: crawl a website and count how many times a word appears on it.
//
// Pipeline:
//   JobManager -> Crawler (pages) -> aggregate (total) -> JobStatus
//
// Modules:
// - page: the downloaded page value
// - fetch: downloading pages (HTTP with retry)
// - extract: links and visible text out of HTML
// - crawl: the breadth-first crawler
// - score: word counting, single page and concurrent
// - job: background jobs with submit/poll
// - config: settings and their defaults
// - error: error types
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod job;
pub mod page;
pub mod score;

pub use config::{CrawlConfig, FetchConfig, ScoreConfig, Settings};
pub use crawl::{CrawlResult, Crawler};
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use job::{JobManager, JobStatus};
pub use page::Page;
pub use score::{aggregate, count_word_occurrences, word_total_occurrences, WordCountReport};
