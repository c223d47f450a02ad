// src/page.rs
// =============================================================================
// A downloaded web page: the URL it came from and the raw HTML we received.
//
// Pages are immutable once built. Two pages are the same page when they have
// the same URL, so equality and hashing only look at the URL.
// =============================================================================

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    content: String,
}

impl Page {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }

    /// The URL this page was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The raw markup of the page
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Page {}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}
