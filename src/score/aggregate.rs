// src/score/aggregate.rs
// =============================================================================
// This module counts a word across many pages at once.
//
// How it works:
// 1. Compile the word matcher once (an empty word fails here, before any
//    page is looked at)
// 2. Hand every page to a blocking worker; at most `workers` run at a time
// 3. Add up the counts as the workers finish
// 4. Return only when every page has been counted
//
// A worker that fails (panics) is logged and adds 0 to the total.
// =============================================================================

use super::counter::WordMatcher;
use crate::error::Result;
use crate::page::Page;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Sums the occurrences of `word` over all `pages`
///
/// The result equals the sum of `count_word_occurrences` on each page,
/// whatever the order in which the workers finish.
pub async fn aggregate(pages: Vec<Page>, word: &str, workers: usize) -> Result<usize> {
    let matcher = WordMatcher::new(word)?;
    let page_count = pages.len();

    let total = sum_counts(pages, workers, move |page| matcher.count_in_page(page)).await;

    info!(word, pages = page_count, total, "total occurrences");
    Ok(total)
}

// Runs `count` on every page with at most `workers` in flight and adds up
// the results. Counting itself cannot fail; a worker that panics is the only
// failure, and it adds 0.
async fn sum_counts<C>(pages: Vec<Page>, workers: usize, count: C) -> usize
where
    C: Fn(&Page) -> usize + Send + Sync + 'static,
{
    let count = Arc::new(count);

    // Counting is CPU work, so it runs on the blocking pool instead of the
    // async worker threads
    let tasks = pages.into_iter().map(|page| {
        let count = Arc::clone(&count);
        async move {
            let url = page.url().to_string();
            let counted = tokio::task::spawn_blocking(move || count(&page)).await;
            (url, counted)
        }
    });

    // buffer_unordered(N) keeps at most N workers busy and yields results
    // as they complete; fold merges them one at a time on this task
    stream::iter(tasks)
        .buffer_unordered(workers.max(1))
        .fold(0usize, |total, (url, counted)| async move {
            match counted {
                Ok(count) => {
                    debug!(url, count, "counted page");
                    total + count
                }
                Err(e) => {
                    error!(url, error = %e, "error in counting word occurrences");
                    total
                }
            }
        })
        .await
}
