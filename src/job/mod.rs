// src/job/mod.rs
// =============================================================================
// This module runs word counts as background jobs.
//
// A caller submits (seed URL, word), gets a job id back right away, and
// polls that id until the job is done. Job state lives in memory for as
// long as the manager does.
// =============================================================================

mod manager;

pub use manager::{JobManager, JobStatus};
