// src/fetch/mock.rs
// An in-memory website for tests. Unknown URLs answer with HTTP 404.

use super::{check_scheme, Fetcher};
use crate::error::{FetchCause, FetchError};
use crate::page::Page;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, Result<String, FetchCause>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, cause: FetchCause) -> Self {
        self.pages.insert(url.to_string(), Err(cause));
        self
    }

    /// Every URL that reached the "network", in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        check_scheme(url)?;
        self.requests.lock().unwrap().push(url.to_string());

        match self.pages.get(url) {
            Some(Ok(html)) => Ok(Page::new(url, html.as_str())),
            Some(Err(cause)) => Err(FetchError::Failed {
                url: url.to_string(),
                attempts: if cause.is_transient() { 3 } else { 1 },
                cause: cause.clone(),
            }),
            None => Err(FetchError::Failed {
                url: url.to_string(),
                attempts: 1,
                cause: FetchCause::Status(404),
            }),
        }
    }
}
