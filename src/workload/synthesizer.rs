//! Workload synthesis: trace records in, job descriptors out.
//!
//! The synthesizer reads its source once. The first successful `generate`
//! call materializes the job list; later calls return the cached list
//! without reopening the trace. A fatal error leaves the synthesizer
//! unmaterialized so the call can be retried.

use super::config::WorkloadConfig;
use super::job::{JobSpec, RawJob};
use crate::reader::{FsResolver, ResourceResolver, TraceRecord, TraceStreamReader};
use crate::reader::source::validate_name;
use crate::utils::error::{RecordError, WorkloadError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

/// Counters collected while reading a trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisStats {
    /// Physical lines read, comments and blanks included
    pub lines_read: usize,

    /// Data lines handed to the synthesizer
    pub records: usize,

    /// Jobs kept
    pub accepted: usize,

    /// Jobs the predicate turned down
    pub rejected: usize,

    /// Lines dropped for structural or numeric problems
    pub malformed: usize,
}

impl SynthesisStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging
    pub fn summary(&self) -> String {
        format!(
            "Lines: {} | Records: {} | Accepted: {} | Rejected: {} | Malformed: {}",
            self.lines_read, self.records, self.accepted, self.rejected, self.malformed
        )
    }
}

enum SynthesisState {
    Configured,
    Materialized {
        jobs: Vec<JobSpec>,
        stats: SynthesisStats,
    },
}

/// Turns one SWF trace into an ordered list of jobs
pub struct WorkloadSynthesizer {
    config: WorkloadConfig,
    resolver: Box<dyn ResourceResolver>,
    source: String,
    state: SynthesisState,
}

impl WorkloadSynthesizer {
    /// Create a synthesizer over a named trace
    ///
    /// **Public** - main entry point for synthesis
    ///
    /// # Arguments
    /// * `config` - Speed, column layout and predicate
    /// * `resolver` - Opens `source` when generation starts
    /// * `source` - Logical trace name; its suffix selects decompression
    ///
    /// # Errors
    /// * `WorkloadError::InvalidConfiguration` - Blank source name
    pub fn new(
        config: WorkloadConfig,
        resolver: impl ResourceResolver + 'static,
        source: impl Into<String>,
    ) -> Result<Self, WorkloadError> {
        let source = source.into();
        validate_name(&source)?;

        Ok(Self {
            config,
            resolver: Box::new(resolver),
            source,
            state: SynthesisState::Configured,
        })
    }

    /// Create a synthesizer over a trace file on disk
    pub fn from_path(path: impl AsRef<Path>, config: WorkloadConfig) -> Result<Self, WorkloadError> {
        let source = path.as_ref().display().to_string();
        Self::new(config, FsResolver::new(), source)
    }

    /// Replace the acceptance predicate
    ///
    /// **Public** - only allowed before the first successful `generate`
    ///
    /// # Errors
    /// * `WorkloadError::AlreadyMaterialized` - The workload was already generated
    pub fn set_predicate(
        &mut self,
        predicate: impl Fn(&JobSpec) -> bool + 'static,
    ) -> Result<(), WorkloadError> {
        if self.is_materialized() {
            return Err(WorkloadError::AlreadyMaterialized);
        }
        self.config.replace_predicate(Box::new(predicate));
        Ok(())
    }

    /// Generate the workload, reading the trace on the first call only
    ///
    /// **Public** - jobs come back in trace order
    ///
    /// # Errors
    /// * `WorkloadError::SourceUnavailable` - The trace cannot be opened or read
    /// * `WorkloadError::MalformedArchive` - The trace container is corrupt
    pub fn generate(&mut self) -> Result<&[JobSpec], WorkloadError> {
        if !self.is_materialized() {
            let (jobs, stats) = self.synthesize()?;
            self.state = SynthesisState::Materialized { jobs, stats };
        }
        Ok(self.jobs())
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self.state, SynthesisState::Materialized { .. })
    }

    /// Generated jobs; empty until `generate` succeeds
    pub fn jobs(&self) -> &[JobSpec] {
        match &self.state {
            SynthesisState::Materialized { jobs, .. } => jobs,
            SynthesisState::Configured => &[],
        }
    }

    pub fn stats(&self) -> Option<&SynthesisStats> {
        match &self.state {
            SynthesisState::Materialized { stats, .. } => Some(stats),
            SynthesisState::Configured => None,
        }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    pub fn source_name(&self) -> &str {
        &self.source
    }

    pub fn into_jobs(self) -> Vec<JobSpec> {
        match self.state {
            SynthesisState::Materialized { jobs, .. } => jobs,
            SynthesisState::Configured => Vec::new(),
        }
    }

    /// Read the whole trace and build the job list
    ///
    /// **Private** - the reader is dropped (and the source closed) on every return
    fn synthesize(&self) -> Result<(Vec<JobSpec>, SynthesisStats), WorkloadError> {
        let start_time = Instant::now();

        info!(
            "Synthesizing workload from '{}' at {} MIPS",
            self.source,
            self.config.mips_rate()
        );

        let stream = self.resolver.open(&self.source)?;
        let mut reader = TraceStreamReader::open(stream, &self.source)?
            .with_comment_marker(self.config.comment_marker());

        debug!("Trace codec: {}", reader.codec().label());

        let mut jobs = Vec::new();
        let mut stats = SynthesisStats::default();
        let mut seen_ids = HashSet::new();

        for item in reader.by_ref() {
            let record = match item {
                Ok(record) => record,
                Err(WorkloadError::MalformedRecord { line, reason }) => {
                    debug!("Skipping line {}: {}", line, reason);
                    stats.malformed += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            stats.records += 1;

            let job = match self.build_job(&record, jobs.len(), &seen_ids) {
                Ok(job) => job,
                Err(reason) => {
                    debug!("Skipping line {}: {}", record.line_number(), reason);
                    stats.malformed += 1;
                    continue;
                }
            };

            if self.config.accepts(&job) {
                seen_ids.insert(job.id);
                jobs.push(job);
                stats.accepted += 1;
            } else {
                stats.rejected += 1;
            }
        }

        stats.lines_read = reader.lines_read();

        if jobs.is_empty() {
            warn!("No jobs accepted from '{}'", self.source);
        }

        info!("{}", stats.summary());
        info!(
            "Workload synthesized in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok((jobs, stats))
    }

    /// Map one record to a candidate job
    ///
    /// **Private** - `accepted` drives sequential ids when the trace has none
    fn build_job(
        &self,
        record: &TraceRecord,
        accepted: usize,
        seen_ids: &HashSet<i64>,
    ) -> Result<JobSpec, RecordError> {
        let raw = RawJob::from_record(record, self.config.columns())?;

        let id = match raw.id {
            Some(id) if seen_ids.contains(&id) => return Err(RecordError::DuplicateId(id)),
            Some(id) => id,
            None => accepted as i64 + 1,
        };

        JobSpec::derive(
            &raw,
            id,
            self.config.mips_rate(),
            self.config.transfer_size(),
        )
    }
}
