// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP(S).
//
// Key functionality:
// - Sends a GET request with a browser-like User-Agent
// - Each attempt has its own timeout (10 seconds by default)
// - Transient failures (timeouts, connection errors) are retried up to
//   3 attempts in total, with a fixed 2 second pause between them
// - A non-2xx status is a definitive answer and is never retried
// - TLS certificates are verified unless the config explicitly says not to
// =============================================================================

use super::{check_scheme, Fetcher};
use crate::config::FetchConfig;
use crate::error::{FetchCause, FetchError, Result};
use crate::page::Page;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// Fetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Builds the HTTP client from the given settings
    ///
    /// Fails with `Error::Client` when the settings cannot make a client,
    /// e.g. a User-Agent that is not a valid header value.
    pub fn new(config: FetchConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        // One client for every request (connection pooling)
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client, config })
    }

    // Sends a single request and reads the body
    async fn attempt(&self, url: &Url) -> std::result::Result<String, FetchCause> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchCause::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchCause::Timeout
            } else {
                FetchCause::Body(e.to_string())
            }
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Page, FetchError> {
        // Rejected before touching the network, and never retried
        let parsed = check_scheme(url)?;

        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt(&parsed).await {
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "fetched page");
                    return Ok(Page::new(url, body));
                }
                Err(cause) if cause.is_transient() && attempt < max_attempts => {
                    warn!(url, attempt, max_attempts, %cause, "fetch failed, retrying");
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(cause) => {
                    return Err(FetchError::Failed {
                        url: url.to_string(),
                        attempts: attempt,
                        cause,
                    });
                }
            }
        }
    }
}

// Maps a reqwest error onto the cause we report
fn categorize_error(error: reqwest::Error) -> FetchCause {
    if error.is_timeout() {
        FetchCause::Timeout
    } else if error.is_connect() {
        FetchCause::Connect(error.to_string())
    } else {
        FetchCause::Request(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is a status code not retried?
//    - A 404 or 500 is an answer from the server, not a network hiccup
//    - Asking again two seconds later almost always gives the same answer
//
// 2. Why tokio::time::sleep instead of std::thread::sleep?
//    - std sleep would block the whole runtime thread
//    - tokio's sleep only suspends this future
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 11\r\nConnection: close\r\n\r\n<p>ciao</p>";
    const ERROR_RESPONSE: &str =
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

    fn fast_config() -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_millis(200),
            retry_delay: Duration::from_millis(10),
            ..FetchConfig::default()
        }
    }

    // Starts a tiny HTTP server on localhost. With `None` it accepts
    // connections and never answers. Returns the base URL and a counter of
    // accepted connections.
    async fn spawn_stub(response: Option<&'static str>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    match response {
                        Some(raw) => {
                            let _ = socket.write_all(raw.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                        None => tokio::time::sleep(Duration::from_secs(30)).await,
                    }
                });
            }
        });

        (format!("http://{}/", addr), hits)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let (url, hits) = spawn_stub(Some(OK_RESPONSE)).await;
        let fetcher = HttpFetcher::new(fast_config()).unwrap();

        let page = fetcher.fetch(&url).await.unwrap();
        assert_eq!(page.url(), url);
        assert_eq!(page.content(), "<p>ciao</p>");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sends_browser_user_agent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(OK_RESPONSE.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf[..n]).to_lowercase()
        });

        let fetcher = HttpFetcher::new(fast_config()).unwrap();
        fetcher.fetch(&format!("http://{}/", addr)).await.unwrap();

        let request = server.await.unwrap();
        assert!(
            request.contains("user-agent: mozilla/5.0"),
            "request was: {}",
            request
        );
    }

    #[test]
    fn test_bad_user_agent_is_client_error() {
        let config = FetchConfig {
            user_agent: "bad\nagent".to_string(),
            ..FetchConfig::default()
        };
        assert!(matches!(HttpFetcher::new(config), Err(Error::Client(_))));
    }

    #[tokio::test]
    async fn test_status_error_not_retried() {
        let (url, hits) = spawn_stub(Some(ERROR_RESPONSE)).await;
        let fetcher = HttpFetcher::new(fast_config()).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Failed { attempts: 1, cause: FetchCause::Status(500), .. }
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_retried_three_times() {
        let (url, hits) = spawn_stub(None).await;
        let fetcher = HttpFetcher::new(fast_config()).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Failed { attempts: 3, cause: FetchCause::Timeout, .. }
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_connection_refused_exhausts_budget() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(fast_config()).unwrap();
        let err = fetcher.fetch(&format!("http://{}/", addr)).await.unwrap_err();
        assert!(matches!(err, FetchError::Failed { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_immediate() {
        let fetcher = HttpFetcher::new(fast_config()).unwrap();

        let err = fetcher.fetch("mailto:someone@example.com").await.unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme { ref scheme, .. } if scheme == "mailto"));

        let err = fetcher.fetch("ftp://example.com/file").await.unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme { ref scheme, .. } if scheme == "ftp"));
    }
}
