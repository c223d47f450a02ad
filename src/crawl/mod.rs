// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Bounded by a maximum depth (link hops) and a maximum number of pages
// - Every URL is downloaded at most once per crawl
// - A page that fails to download is logged and skipped
//
// The crawl loop itself lives in queue.rs; this file holds the types it
// works with.
// =============================================================================

mod queue;

use crate::config::CrawlConfig;
use crate::page::Page;

/// Breadth-first crawler over any Fetcher
#[derive(Debug, Clone)]
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }
}

/// The pages collected by one crawl, unique by URL and in crawl order
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pages: Vec<Page>,
    depths: Vec<usize>,
}

impl CrawlResult {
    // Callers guarantee the URL has not been added before
    fn push(&mut self, page: Page, depth: usize) {
        self.pages.push(page);
        self.depths.push(depth);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// URLs of the collected pages, in crawl order
    pub fn urls(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.url().to_string()).collect()
    }

    /// Each page with the number of link hops it took to reach it
    pub fn entries(&self) -> impl Iterator<Item = (&Page, usize)> + '_ {
        self.pages.iter().zip(self.depths.iter().copied())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.iter().any(|p| p.url() == url)
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}
