// src/config.rs
// =============================================================================
// Settings for the crawler, the fetcher and the word counter.
//
// Every field has a default, so an empty JSON object is a valid settings
// file. The CLI loads an optional file first and then applies its flags on
// top of it.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Browser-like User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Bounds for one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Maximum number of link hops from the seed URL
    pub max_depth: usize,
    /// Maximum number of pages collected
    pub max_pages: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 100,
        }
    }
}

/// How pages are downloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Timeout for a single request attempt
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Total attempts per URL, including the first one
    pub max_attempts: usize,
    /// Pause between two attempts
    #[serde(with = "duration_secs")]
    pub retry_delay: Duration,
    /// Skip TLS certificate verification. Off unless asked for explicitly.
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            accept_invalid_certs: false,
        }
    }
}

/// How the word count job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Number of pages counted at the same time
    pub workers: usize,
    /// Crawl depth used by word count jobs
    pub max_depth: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            workers,
            max_depth: 1,
        }
    }
}

/// All settings together, as read from a settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub crawl: CrawlConfig,
    pub fetch: FetchConfig,
    pub score: ScoreConfig,
}

impl Settings {
    /// Loads settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;

        Self::from_json(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Parses settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// Durations are written as (fractional) seconds in settings files
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
