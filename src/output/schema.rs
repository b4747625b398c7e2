//! Output JSON schema for generated workloads.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::utils::config::SCHEMA_VERSION;
use crate::workload::{JobSpec, SynthesisStats, WorkloadSynthesizer};
use serde::{Deserialize, Serialize};

/// Top-level workload document written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace the jobs were synthesized from
    pub source: String,

    /// Resource speed used to compute job lengths
    pub mips_rate: i64,

    /// Timestamp when the workload was generated
    pub generated_at: String,

    /// Reading counters
    pub stats: SynthesisStats,

    /// Jobs in trace order
    pub jobs: Vec<JobSpec>,
}

impl WorkloadDocument {
    /// Snapshot a materialized synthesizer into a document
    ///
    /// **Public** - `stats` is empty when the synthesizer has not generated yet
    pub fn from_synthesizer(synthesizer: &WorkloadSynthesizer) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: synthesizer.source_name().to_string(),
            mips_rate: synthesizer.config().mips_rate(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            stats: synthesizer.stats().cloned().unwrap_or_default(),
            jobs: synthesizer.jobs().to_vec(),
        }
    }

    /// Major component of the schema version
    pub fn major_version(&self) -> Option<u32> {
        self.version.split('.').next()?.parse().ok()
    }
}
