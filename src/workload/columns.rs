//! Declarative column layout of a trace dialect.
//!
//! A `ColumnMap` says which column holds which job attribute. The standard
//! SWF layout is built in; other dialects can be loaded from JSON:
//!
//! ```json
//! {
//!   "min_fields": 18,
//!   "columns": { "submit_time": 1, "run_time": 3, "used_processors": 4, "requested_processors": 7 }
//! }
//! ```
//!
//! Leaving `job_id` out means ids are assigned sequentially.

use crate::utils::config::STANDARD_FIELD_COUNT;
use crate::utils::error::WorkloadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Semantic job attribute stored in a trace column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    JobId,
    SubmitTime,
    RunTime,
    UsedProcessors,
    RequestedProcessors,
    /// Requested wall-clock or CPU time (reserved)
    RequestedTime,
    /// Submitting user (reserved)
    UserId,
    /// Submitting user's group (reserved)
    GroupId,
}

impl JobField {
    /// Fields every dialect must locate
    pub const REQUIRED: [JobField; 4] = [
        JobField::SubmitTime,
        JobField::RunTime,
        JobField::UsedProcessors,
        JobField::RequestedProcessors,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JobField::JobId => "job_id",
            JobField::SubmitTime => "submit_time",
            JobField::RunTime => "run_time",
            JobField::UsedProcessors => "used_processors",
            JobField::RequestedProcessors => "requested_processors",
            JobField::RequestedTime => "requested_time",
            JobField::UserId => "user_id",
            JobField::GroupId => "group_id",
        }
    }

    /// Whether the synthesizer reads this field
    pub fn is_consumed(self) -> bool {
        !matches!(
            self,
            JobField::RequestedTime | JobField::UserId | JobField::GroupId
        )
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Standard Workload Format layout (0-indexed)
pub const STANDARD_COLUMNS: &[(JobField, usize)] = &[
    (JobField::JobId, 0),
    (JobField::SubmitTime, 1),
    (JobField::RunTime, 3),
    (JobField::UsedProcessors, 4),
    (JobField::RequestedProcessors, 7),
    (JobField::RequestedTime, 8),
    (JobField::UserId, 11),
    (JobField::GroupId, 12),
];

/// Column index table for one trace dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Records with fewer fields are discarded
    pub min_fields: usize,

    /// Field -> 0-based column index
    pub columns: BTreeMap<JobField, usize>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl ColumnMap {
    /// The standard 18-column SWF layout
    pub fn standard() -> Self {
        Self {
            min_fields: STANDARD_FIELD_COUNT,
            columns: STANDARD_COLUMNS.iter().copied().collect(),
        }
    }

    /// Drop a field from the map (e.g. `JobId` for dialects without job numbers)
    pub fn without(mut self, field: JobField) -> Self {
        self.columns.remove(&field);
        self
    }

    pub fn with_column(mut self, field: JobField, index: usize) -> Self {
        self.columns.insert(field, index);
        self
    }

    pub fn with_min_fields(mut self, min_fields: usize) -> Self {
        self.min_fields = min_fields;
        self
    }

    pub fn index_of(&self, field: JobField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Whether job ids come from the trace rather than a counter
    pub fn has_job_id(&self) -> bool {
        self.columns.contains_key(&JobField::JobId)
    }

    /// Check the map is usable before any trace is read
    ///
    /// **Public** - called by `WorkloadConfig::with_columns`
    ///
    /// # Errors
    /// * `WorkloadError::InvalidConfiguration` - A required field is missing or
    ///   a column lies beyond `min_fields`
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if let Some(missing) = JobField::REQUIRED
            .iter()
            .find(|field| !self.columns.contains_key(*field))
        {
            return Err(WorkloadError::InvalidConfiguration(format!(
                "column map has no column for '{}'",
                missing
            )));
        }

        if let Some((field, index)) = self
            .columns
            .iter()
            .find(|(_, index)| **index >= self.min_fields)
        {
            return Err(WorkloadError::InvalidConfiguration(format!(
                "column {} for '{}' is outside the {} required fields",
                index, field, self.min_fields
            )));
        }

        Ok(())
    }

    /// Load and validate a dialect from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            WorkloadError::InvalidConfiguration(format!(
                "cannot read column map {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, WorkloadError> {
        let map: ColumnMap = serde_json::from_str(text).map_err(|e| {
            WorkloadError::InvalidConfiguration(format!("invalid column map: {}", e))
        })?;
        map.validate()?;
        Ok(map)
    }
}
