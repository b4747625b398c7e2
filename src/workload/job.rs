//! Job descriptors synthesized from trace records.
//!
//! A trace record becomes a job in two steps: `RawJob::from_record` pulls
//! the consumed columns out as integers, then `JobSpec::derive` applies the
//! SWF fallback rules and converts runtime into work length.

use super::columns::{ColumnMap, JobField};
use crate::reader::TraceRecord;
use crate::utils::error::RecordError;
use serde::{Deserialize, Serialize};

/// A simulated job ready for the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Unique within one synthesis run
    pub id: i64,

    /// Wall-clock runtime on one processor, at least 1
    pub runtime_seconds: i64,

    /// Processors the job occupies, at least 1
    pub processor_count: i64,

    /// Delay from simulation start until the job is submitted
    pub submit_delay_seconds: i64,

    /// `runtime_seconds * mips_rate`
    pub computed_length: i64,

    /// Input transfer size in bytes
    pub input_size: i64,

    /// Output transfer size in bytes
    pub output_size: i64,
}

/// Consumed columns of one record, before fallback rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawJob {
    /// `None` when the dialect has no job id column
    pub id: Option<i64>,
    pub submit_time: i64,
    pub run_time: i64,
    pub used_processors: i64,
    pub requested_processors: i64,
}

impl RawJob {
    /// Extract the consumed columns of a record
    ///
    /// **Public** - structural and numeric checks for one record
    ///
    /// # Errors
    /// * `RecordError::TooFewFields` - Record shorter than `columns.min_fields`
    /// * `RecordError::InvalidNumber` - A consumed column is not an integer
    pub fn from_record(record: &TraceRecord, columns: &ColumnMap) -> Result<Self, RecordError> {
        if record.len() < columns.min_fields {
            return Err(RecordError::TooFewFields {
                found: record.len(),
                required: columns.min_fields,
            });
        }

        let id = match columns.index_of(JobField::JobId) {
            Some(index) => Some(parse_column(record, index)?),
            None => None,
        };

        Ok(Self {
            id,
            submit_time: parse_field(record, columns, JobField::SubmitTime)?,
            run_time: parse_field(record, columns, JobField::RunTime)?,
            used_processors: parse_field(record, columns, JobField::UsedProcessors)?,
            requested_processors: parse_field(record, columns, JobField::RequestedProcessors)?,
        })
    }
}

impl JobSpec {
    /// Build a job from raw columns
    ///
    /// **Public** - applies the runtime and processor floors
    ///
    /// # Arguments
    /// * `raw` - Parsed columns
    /// * `id` - Resolved job id
    /// * `mips_rate` - Speed of the target resource
    /// * `transfer_size` - Input/output size in bytes
    ///
    /// # Errors
    /// * `RecordError::LengthOverflow` - `runtime * mips_rate` does not fit in i64
    pub fn derive(
        raw: &RawJob,
        id: i64,
        mips_rate: i64,
        transfer_size: i64,
    ) -> Result<Self, RecordError> {
        let runtime_seconds = floor_runtime(raw.run_time);
        let computed_length = runtime_seconds
            .checked_mul(mips_rate)
            .ok_or(RecordError::LengthOverflow { runtime_seconds })?;

        Ok(Self {
            id,
            runtime_seconds,
            processor_count: resolve_processors(raw.requested_processors, raw.used_processors),
            submit_delay_seconds: raw.submit_time,
            computed_length,
            input_size: transfer_size,
            output_size: transfer_size,
        })
    }

    /// Total processor-seconds the job occupies
    pub fn processor_seconds(&self) -> i64 {
        self.runtime_seconds.saturating_mul(self.processor_count)
    }
}

// Runtimes under a second are truncated to 0 in SWF, and -1 means unknown
pub fn floor_runtime(raw: i64) -> i64 {
    raw.max(1)
}

// Either processor column may be 0 or -1 when a site did not record it
pub fn resolve_processors(requested: i64, used: i64) -> i64 {
    requested.max(used).max(1)
}

fn parse_field(
    record: &TraceRecord,
    columns: &ColumnMap,
    field: JobField,
) -> Result<i64, RecordError> {
    // validate() guarantees required fields are mapped
    let index = columns.index_of(field).unwrap_or(usize::MAX);
    parse_column(record, index)
}

fn parse_column(record: &TraceRecord, index: usize) -> Result<i64, RecordError> {
    let value = record.field(index).ok_or(RecordError::TooFewFields {
        found: record.len(),
        required: index.saturating_add(1),
    })?;

    value.trim().parse::<i64>().map_err(|_| RecordError::InvalidNumber {
        column: index,
        value: value.to_string(),
    })
}
