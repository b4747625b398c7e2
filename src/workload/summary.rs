//! Aggregate statistics over a generated workload.

use super::job::JobSpec;
use serde::{Deserialize, Serialize};

/// Workload statistics
///
/// **Public** - returned from summarize
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    /// Number of jobs
    pub job_count: usize,

    /// Sum of computed lengths
    pub total_length: i64,

    /// Sum of runtime * processors
    pub total_processor_seconds: i64,

    /// Widest job
    pub max_processors: i64,

    /// Earliest and latest submit delay
    pub first_submit: i64,
    pub last_submit: i64,

    /// Mean runtime in seconds
    pub mean_runtime: f64,
}

/// Calculate workload statistics
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `jobs` - Generated jobs, in any order
///
/// # Returns
/// Statistics about the workload (all zero for an empty slice)
pub fn summarize(jobs: &[JobSpec]) -> WorkloadSummary {
    if jobs.is_empty() {
        return WorkloadSummary::default();
    }

    let total_runtime: i64 = jobs.iter().map(|j| j.runtime_seconds).fold(0, i64::saturating_add);

    WorkloadSummary {
        job_count: jobs.len(),
        total_length: jobs.iter().map(|j| j.computed_length).fold(0, i64::saturating_add),
        total_processor_seconds: jobs
            .iter()
            .map(JobSpec::processor_seconds)
            .fold(0, i64::saturating_add),
        max_processors: jobs.iter().map(|j| j.processor_count).max().unwrap_or(0),
        first_submit: jobs.iter().map(|j| j.submit_delay_seconds).min().unwrap_or(0),
        last_submit: jobs.iter().map(|j| j.submit_delay_seconds).max().unwrap_or(0),
        mean_runtime: total_runtime as f64 / jobs.len() as f64,
    }
}

impl WorkloadSummary {
    /// Seconds between the first and last submission
    pub fn submit_span(&self) -> i64 {
        self.last_submit.saturating_sub(self.first_submit)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Jobs: {} | Length: {} MI | CPU: {} proc-s | Max procs: {} | Span: {}s | Mean runtime: {:.1}s",
            self.job_count,
            self.total_length,
            self.total_processor_seconds,
            self.max_processors,
            self.submit_span(),
            self.mean_runtime
        )
    }
}
