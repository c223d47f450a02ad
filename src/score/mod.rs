// src/score/mod.rs
// =============================================================================
// This module answers the actual question: how many times does a word
// appear on a website?
//
// Submodules:
// - counter: counts a word in one page
// - aggregate: counts a word over many pages concurrently
//
// This file ties them to the crawler in `word_total_occurrences`.
// =============================================================================

mod aggregate;
mod counter;

pub use aggregate::aggregate;
pub use counter::{count_word_occurrences, WordMatcher};
pub(crate) use counter::validate_word;

use crate::crawl::Crawler;
use crate::error::Result;
use crate::fetch::Fetcher;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of a word count over a crawled site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCountReport {
    pub total_occurrences: usize,
    /// Pages that were downloaded and counted, in crawl order
    pub visited_urls: Vec<String>,
}

/// Crawls from `seed_url` and counts `word` over every collected page
///
/// The word is checked before anything is downloaded. The crawl fails only
/// when not even the seed page could be fetched.
pub async fn word_total_occurrences<F: Fetcher>(
    crawler: &Crawler<F>,
    seed_url: &str,
    word: &str,
    workers: usize,
) -> Result<WordCountReport> {
    let word = validate_word(word)?;

    let pages = crawler.build_pages_set(seed_url).await?;
    info!(pages = pages.len(), "found pages to count");

    let visited_urls = pages.urls();
    let total_occurrences = aggregate(pages.into_pages(), word, workers).await?;

    Ok(WordCountReport {
        total_occurrences,
        visited_urls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;
    use crate::error::{Error, FetchCause};
    use crate::fetch::mock::MockFetcher;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn crawler(fetcher: Arc<MockFetcher>, max_depth: usize) -> Crawler<Arc<MockFetcher>> {
        Crawler::new(
            fetcher,
            CrawlConfig {
                max_depth,
                max_pages: 10,
            },
        )
    }

    #[tokio::test]
    async fn test_three_page_site() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page(
                    "https://a.test/",
                    r#"<p>word and WORD</p><a href="/b">b</a><a href="/c">c</a>"#,
                )
                .page("https://a.test/b", "<p>a word</p>")
                .page("https://a.test/c", "<p>nothing here</p>"),
        );

        let report = word_total_occurrences(&crawler(fetcher, 1), "https://a.test/", "word", 4)
            .await
            .unwrap();

        assert_eq!(report.total_occurrences, 3);
        let mut urls = report.visited_urls.clone();
        urls.sort();
        assert_eq!(urls, vec!["https://a.test/", "https://a.test/b", "https://a.test/c"]);
    }

    #[tokio::test]
    async fn test_failed_link_is_skipped() {
        let fetcher = Arc::new(
            MockFetcher::new()
                .page(
                    "https://a.test/",
                    r#"<p>word</p><a href="/slow">slow</a><a href="/ok">ok</a>"#,
                )
                .failing("https://a.test/slow", FetchCause::Timeout)
                .page("https://a.test/ok", "<p>word word</p>"),
        );

        let report = word_total_occurrences(&crawler(fetcher, 1), "https://a.test/", "word", 2)
            .await
            .unwrap();

        assert_eq!(report.total_occurrences, 3);
        assert!(!report.visited_urls.contains(&"https://a.test/slow".to_string()));
    }

    #[tokio::test]
    async fn test_empty_word_fails_before_crawling() {
        let fetcher = Arc::new(MockFetcher::new().page("https://a.test/", "word"));

        let err = word_total_occurrences(&crawler(Arc::clone(&fetcher), 1), "https://a.test/", " ", 2)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_seed_failure_is_an_error() {
        let fetcher = Arc::new(MockFetcher::new());

        let err = word_total_occurrences(&crawler(fetcher, 1), "https://a.test/", "word", 2)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fetch(_)));
    }
}
