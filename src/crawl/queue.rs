// src/crawl/queue.rs
// =============================================================================
// This module implements website crawling with a breadth-first approach.
//
// How it works:
// 1. Start with the seed URL (depth 0) in a queue
// 2. Pop the next URL; skip it if already visited or too deep
// 3. Fetch the page; on failure log it and move on
// 4. Record the page, and if we are not yet at max depth, queue its links
// 5. Repeat until the queue is empty or we have max_pages pages
//
// Bookkeeping:
// - `queued` holds every URL that ever entered the queue, so a URL linked
//   from many pages is still fetched (or attempted) only once
// - `visited` holds the URLs that were fetched successfully
// =============================================================================

use super::{CrawlResult, Crawler};
use crate::error::{Error, FetchError, Result};
use crate::extract::extract_links;
use crate::fetch::{check_scheme, Fetcher};
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};

// Represents a page in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: usize, // How many link hops from the seed URL
}

impl<F: Fetcher> Crawler<F> {
    /// Crawls from `seed_url` and returns every page it could collect
    ///
    /// The seed must be an http or https URL; anything else is rejected
    /// before any request is made. Failures on other pages are logged and
    /// skipped. The crawl only fails when it collected no page at all
    /// because the seed itself could not be fetched.
    pub async fn build_pages_set(&self, seed_url: &str) -> Result<CrawlResult> {
        let seed_url = seed_url.trim();
        if seed_url.is_empty() {
            return Err(Error::InvalidArgument("the seed URL cannot be empty".to_string()));
        }

        let mut seed = check_scheme(seed_url)?;
        seed.set_fragment(None);
        let seed = seed.to_string();

        let max_depth = self.config.max_depth;
        let max_pages = self.config.max_pages;

        // Queue of pages to crawl
        let mut queue = VecDeque::new();
        queue.push_back(CrawlItem {
            url: seed.clone(),
            depth: 0,
        });

        let mut queued = HashSet::from([seed]);
        let mut visited = HashSet::new();
        let mut results = CrawlResult::default();
        let mut seed_error: Option<FetchError> = None;

        while results.len() < max_pages {
            let Some(item) = queue.pop_front() else {
                break;
            };

            if visited.contains(&item.url) || item.depth > max_depth {
                continue;
            }

            if let Err(e) = check_scheme(&item.url) {
                warn!(url = %item.url, error = %e, "skipping unsupported URL");
                continue;
            }

            info!(depth = item.depth, url = %item.url, "crawling");

            let page = match self.fetcher.fetch(&item.url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %item.url, error = %e, "failed to download page");
                    if item.depth == 0 {
                        seed_error = Some(e);
                    }
                    continue;
                }
            };

            visited.insert(item.url.clone());

            // If we haven't reached max depth, extract links and add to queue
            if item.depth < max_depth {
                match extract_links(&page) {
                    Ok(links) => {
                        for link in links {
                            if !visited.contains(&link) && queued.insert(link.clone()) {
                                queue.push_back(CrawlItem {
                                    url: link,
                                    depth: item.depth + 1,
                                });
                            }
                        }
                    }
                    Err(e) => warn!(error = %e, "treating page as having no links"),
                }
            }

            results.push(page, item.depth);
        }

        if results.is_empty() {
            if let Some(e) = seed_error {
                return Err(e.into());
            }
        }

        info!(pages = results.len(), "crawling finished");
        Ok(results)
    }
}
