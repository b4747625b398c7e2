//! Workload synthesis from parsed trace records.
//!
//! This module handles:
//! - Mapping trace columns to job attributes
//! - Applying SWF fallback rules (runtime and processor floors)
//! - Filtering candidate jobs through an acceptance predicate
//! - Caching the generated workload

pub mod columns;
pub mod config;
pub mod job;
pub mod summary;
pub mod synthesizer;

// Re-export main types
pub use columns::{ColumnMap, JobField};
pub use config::{accept_all, Predicate, WorkloadConfig};
pub use job::JobSpec;
pub use summary::{summarize, WorkloadSummary};
pub use synthesizer::{SynthesisStats, WorkloadSynthesizer};
