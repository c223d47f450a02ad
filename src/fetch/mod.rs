// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawler only talks to the Fetcher trait, so it can run against the
// real HTTP client or against an in-memory site in tests.
//
// Submodules:
// - http: the reqwest-based fetcher with timeout and retry
// =============================================================================

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpFetcher;

use crate::error::FetchError;
use crate::page::Page;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Something that can turn a URL into a Page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads `url`. Only http and https URLs are accepted.
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

// Lets a fetcher be shared, e.g. between a crawler and the code inspecting it
#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        (**self).fetch(url).await
    }
}

/// Parses `url` and checks that it is an http or https URL
///
/// Nothing is sent over the network; callers use this to reject a URL
/// before any fetch is attempted.
pub fn check_scheme(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}
