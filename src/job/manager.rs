// src/job/manager.rs
// =============================================================================
// The job table and the submit/poll entry points.
//
// - submit_word_count_job: validates the input, stores a pending job and
//   spawns a tokio task that crawls and counts
// - get_job_status: returns pending, success (total + visited URLs) or error
// - remove_job: drops a job from the table
//
// Bad input (empty word or URL, non-http scheme) is rejected right away and
// never becomes a job.
// =============================================================================

use crate::crawl::Crawler;
use crate::error::{Error, Result};
use crate::fetch::{check_scheme, Fetcher};
use crate::score::{validate_word, word_total_occurrences, WordCountReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Where a job is at
///
/// Serialized with a "status" tag, e.g.
/// `{"status":"success","total_occurrences":3,"visited_urls":[...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    /// Still crawling or counting
    Pending,
    /// Finished with a total
    Success {
        total_occurrences: usize,
        visited_urls: Vec<String>,
    },
    /// The crawl could not produce any page
    Error { message: String },
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

impl From<Result<WordCountReport>> for JobStatus {
    fn from(outcome: Result<WordCountReport>) -> Self {
        match outcome {
            Ok(report) => JobStatus::Success {
                total_occurrences: report.total_occurrences,
                visited_urls: report.visited_urls,
            },
            Err(e) => JobStatus::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Runs word count jobs on the current tokio runtime
///
/// Job entries stay in memory until `remove_job` is called for them, so a
/// long-lived manager should remove jobs once their result has been read.
pub struct JobManager<F> {
    crawler: Arc<Crawler<F>>,
    workers: usize,
    // Every submitted job, finished or not, until removed
    jobs: Arc<RwLock<HashMap<Uuid, JobStatus>>>,
}

impl<F: Fetcher + 'static> JobManager<F> {
    /// `workers` is how many pages are counted at the same time
    pub fn new(crawler: Crawler<F>, workers: usize) -> Self {
        Self {
            crawler: Arc::new(crawler),
            workers,
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Starts counting `word` on the site reachable from `seed_url`
    ///
    /// Returns the job id once the job is queued. Empty arguments and
    /// non-http(s) seeds are rejected here, before anything is spawned.
    pub async fn submit_word_count_job(&self, seed_url: &str, word: &str) -> Result<Uuid> {
        let seed_url = seed_url.trim();
        if seed_url.is_empty() {
            return Err(Error::InvalidArgument("the seed URL cannot be empty".to_string()));
        }
        let word = validate_word(word)?;
        check_scheme(seed_url)?;

        let job_id = Uuid::new_v4();
        self.jobs.write().await.insert(job_id, JobStatus::Pending);
        info!(%job_id, seed_url, word, "submitted word count job");

        let crawler = Arc::clone(&self.crawler);
        let jobs = Arc::clone(&self.jobs);
        let workers = self.workers;
        let seed_url = seed_url.to_string();
        let word = word.to_string();

        tokio::spawn(
            async move {
                let outcome = word_total_occurrences(&crawler, &seed_url, &word, workers).await;
                match &outcome {
                    Ok(report) => info!(total = report.total_occurrences, "job finished"),
                    Err(e) => error!(error = %e, "job failed"),
                }
                // A job removed while it was running stays removed
                if let Some(status) = jobs.write().await.get_mut(&job_id) {
                    *status = JobStatus::from(outcome);
                }
            }
            .instrument(info_span!("job", %job_id)),
        );

        Ok(job_id)
    }

    /// Current state of a job
    pub async fn get_job_status(&self, job_id: Uuid) -> Result<JobStatus> {
        self.jobs
            .read()
            .await
            .get(&job_id)
            .cloned()
            .ok_or(Error::JobNotFound(job_id))
    }

    /// Forgets a job and returns its last known state
    ///
    /// Removing a pending job does not stop its task, but its result is
    /// discarded when it finishes.
    pub async fn remove_job(&self, job_id: Uuid) -> Result<JobStatus> {
        self.jobs
            .write()
            .await
            .remove(&job_id)
            .ok_or(Error::JobNotFound(job_id))
    }
}
