// src/extract/links.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate to find every <a href="..."> in the page and
// the `url` crate to resolve relative references against the page URL.
//
// Only absolute http/https links survive. Anything else (mailto:, tel:,
// javascript:, unparseable hrefs) is dropped with a debug log.
// =============================================================================

use crate::error::ExtractionError;
use crate::page::Page;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Extracts all links of a page as absolute, normalized URLs
///
/// Fragments are removed, so `/docs#intro` and `/docs` are the same link.
/// Fails when the page's own URL cannot be used to resolve relative links.
///
/// Example:
///   page.url = "https://example.com/page/"
///   <a href="../docs#top">  ->  "https://example.com/docs"
pub fn extract_links(page: &Page) -> Result<HashSet<String>, ExtractionError> {
    let base = Url::parse(page.url()).map_err(|e| ExtractionError {
        url: page.url().to_string(),
        reason: format!("invalid page URL: {}", e),
    })?;

    let selector = Selector::parse("a[href]").map_err(|e| ExtractionError {
        url: page.url().to_string(),
        reason: format!("invalid selector: {}", e),
    })?;

    let document = Html::parse_document(page.content());
    let mut links = HashSet::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match resolve_url(&base, href) {
            Some(url) if is_crawlable(&url) => {
                links.insert(url.to_string());
            }
            Some(url) => debug!(page = page.url(), link = %url, "skipping non-http link"),
            None => debug!(page = page.url(), href, "skipping malformed link"),
        }
    }

    debug!(page = page.url(), count = links.len(), "extracted links");
    Ok(links)
}

/// Resolves a possibly-relative href against the page URL
///
/// Absolute hrefs parse on their own; relative ones are joined with the base
/// the way a browser would. The fragment is dropped in both cases.
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href.trim()).ok()?;
    url.set_fragment(None);
    Some(url)
}

/// Only http and https URLs can be crawled
fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
