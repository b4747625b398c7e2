//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod generate;
pub mod utils;

// Re-export main command functions
pub use generate::{execute_generate, validate_args, GenerateArgs, JobFilter};
pub use utils::{display_columns, display_version, validate_workload_file};
