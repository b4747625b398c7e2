//! Output writers for generated workloads.
//!
//! This module handles writing data to disk:
//! - Versioned JSON workload documents
//! - Reading documents back for validation

pub mod json;
pub mod schema;

// Re-export main functions
pub use json::{read_workload, workload_to_string, write_workload};
pub use schema::WorkloadDocument;
