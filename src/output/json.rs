//! JSON workload output writer.
//!
//! Writes WorkloadDocument structs to JSON files with proper formatting.

use super::schema::WorkloadDocument;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a workload document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - Workload to write
/// * `output_path` - Path to output JSON file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let document = WorkloadDocument::from_synthesizer(&synthesizer);
/// write_workload(&document, "jobs.json")?;
/// ```
pub fn write_workload(
    document: &WorkloadDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing workload to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Workload written successfully ({} jobs, {} bytes)",
        document.jobs.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a workload document to a string
///
/// **Public** - useful for tests and piping to stdout
pub fn workload_to_string(document: &WorkloadDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a workload document from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Arguments
/// * `input_path` - Path to JSON file
///
/// # Returns
/// Parsed WorkloadDocument
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::UnsupportedVersion` - Document written by an incompatible schema
pub fn read_workload(input_path: impl AsRef<Path>) -> Result<WorkloadDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading workload from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let document: WorkloadDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    let supported = SCHEMA_VERSION.split('.').next().and_then(|v| v.parse().ok());
    if document.major_version() != supported {
        return Err(OutputError::UnsupportedVersion(document.version));
    }

    debug!(
        "Workload loaded: version {}, {} jobs from {}",
        document.version,
        document.jobs.len(),
        document.source
    );

    Ok(document)
}
