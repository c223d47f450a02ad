// src/error.rs
// =============================================================================
// Error types for the whole crate.
//
// Each stage has its own error so callers can decide what to do with it:
// - FetchError: one URL could not be downloaded (the crawler skips it)
// - ExtractionError: one page could not be scanned for links (zero links)
// - Error: the crate-level error returned by the pipeline and job facade
// =============================================================================

use thiserror::Error;
use uuid::Uuid;

/// Why a fetch attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchCause {
    /// The request did not finish within the per-attempt timeout
    #[error("request timed out")]
    Timeout,

    /// Could not connect to the host (DNS, refused, reset)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other error while sending the request
    #[error("request error: {0}")]
    Request(String),

    /// The server answered with a non-success status code
    #[error("HTTP {0}")]
    Status(u16),

    /// The response body could not be read
    #[error("failed to read body: {0}")]
    Body(String),
}

impl FetchCause {
    /// Transient causes are retried; a status code is a definitive answer
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchCause::Status(_))
    }
}

/// Errors returned by a Fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported URL scheme '{scheme}' for {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to fetch {url} after {attempts} attempt(s): {cause}")]
    Failed {
        url: String,
        attempts: usize,
        cause: FetchCause,
    },
}

/// The markup of a page could not be scanned for links
#[derive(Debug, Error)]
#[error("failed to extract links from {url}: {reason}")]
pub struct ExtractionError {
    pub url: String,
    pub reason: String,
}

/// The crate-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// A precondition failed before any work started (empty word or URL)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported URL scheme '{scheme}' for {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error(transparent)]
    Fetch(FetchError),

    #[error("job not found: {0}")]
    JobNotFound(Uuid),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        // A URL that was rejected before any I/O is a bad argument, not a
        // failed fetch
        match err {
            FetchError::UnsupportedScheme { url, scheme } => {
                Error::UnsupportedScheme { url, scheme }
            }
            err @ FetchError::InvalidUrl { .. } => Error::InvalidArgument(err.to_string()),
            other => Error::Fetch(other),
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
