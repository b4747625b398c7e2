//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while opening a trace or synthesizing a workload
#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Trace source '{name}' is unavailable: {source}")]
    SourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Trace source '{name}' is not a valid archive: {reason}")]
    MalformedArchive { name: String, reason: String },

    /// Non-fatal: the synthesizer drops the record and keeps reading
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: RecordError },

    #[error("Workload already generated; configuration is sealed")]
    AlreadyMaterialized,
}

impl WorkloadError {
    /// Whether this error aborts generation
    ///
    /// **Public** - callers consuming the raw reader use this to skip bad lines
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WorkloadError::MalformedRecord { .. })
    }
}

/// Reasons a single trace record is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected at least {required} fields, found {found}")]
    TooFewFields { found: usize, required: usize },

    #[error("column {column} holds non-integer value '{value}'")]
    InvalidNumber { column: usize, value: String },

    #[error("line is not valid UTF-8")]
    NotUtf8,

    #[error("job id {0} already used in this run")]
    DuplicateId(i64),

    #[error("job length overflows for runtime {runtime_seconds}s")]
    LengthOverflow { runtime_seconds: i64 },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_is_not_fatal() {
        let err = WorkloadError::MalformedRecord {
            line: 3,
            reason: RecordError::NotUtf8,
        };
        assert!(!err.is_fatal());
        assert!(WorkloadError::AlreadyMaterialized.is_fatal());
    }

    #[test]
    fn test_error_messages_name_the_source() {
        let err = WorkloadError::MalformedArchive {
            name: "trace.zip".to_string(),
            reason: "archive has no file entries".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Trace source 'trace.zip' is not a valid archive: archive has no file entries"
        );
    }
}
