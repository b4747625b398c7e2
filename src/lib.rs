//! SWF Workload
//!
//! Converts Standard Workload Format traces into job descriptors
//! for simulation engines.
//!
//! The pipeline has two stages:
//! - [`reader`] opens the trace (raw, gzip or zip) and yields tokenized lines
//! - [`workload`] maps columns to jobs, filters them and caches the result
//!
//! ## Getting Started
//!
//! ```ignore
//! use swf_workload::workload::{WorkloadConfig, WorkloadSynthesizer};
//!
//! let config = WorkloadConfig::new(1000)?.with_predicate(|job| job.processor_count <= 64);
//! let mut synthesizer = WorkloadSynthesizer::from_path("traces/kth-sp2.swf.gz", config)?;
//! let jobs = synthesizer.generate()?;
//! ```

pub mod commands;
pub mod output;
pub mod reader;
pub mod utils;
pub mod workload;
