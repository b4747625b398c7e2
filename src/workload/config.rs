//! Synthesizer configuration.
//!
//! Every setter validates immediately, so a `WorkloadConfig` that exists is
//! a usable one. Nothing is checked lazily at generation time.

use super::columns::ColumnMap;
use super::job::JobSpec;
use crate::utils::config::{COMMENT_MARKER, DEFAULT_TRANSFER_SIZE};
use crate::utils::error::WorkloadError;
use std::fmt;

/// Decides whether a candidate job enters the workload
pub type Predicate = Box<dyn Fn(&JobSpec) -> bool>;

/// Predicate used when the caller supplies none
pub fn accept_all() -> Predicate {
    Box::new(|_: &JobSpec| true)
}

/// Immutable settings for one `WorkloadSynthesizer`
pub struct WorkloadConfig {
    mips_rate: i64,
    columns: ColumnMap,
    transfer_size: i64,
    comment_marker: char,
    predicate: Predicate,
}

impl WorkloadConfig {
    /// Create a configuration for a resource of the given speed
    ///
    /// **Public** - main entry point for configuration
    ///
    /// # Arguments
    /// * `mips_rate` - Processing speed used to turn runtime into job length
    ///
    /// # Errors
    /// * `WorkloadError::InvalidConfiguration` - `mips_rate` is zero or negative
    pub fn new(mips_rate: i64) -> Result<Self, WorkloadError> {
        if mips_rate <= 0 {
            return Err(WorkloadError::InvalidConfiguration(format!(
                "MIPS rate must be greater than 0, got {}",
                mips_rate
            )));
        }

        Ok(Self {
            mips_rate,
            columns: ColumnMap::standard(),
            transfer_size: DEFAULT_TRANSFER_SIZE,
            comment_marker: COMMENT_MARKER,
            predicate: accept_all(),
        })
    }

    /// Use a non-standard column layout
    pub fn with_columns(mut self, columns: ColumnMap) -> Result<Self, WorkloadError> {
        columns.validate()?;
        self.columns = columns;
        Ok(self)
    }

    pub fn with_transfer_size(mut self, bytes: i64) -> Result<Self, WorkloadError> {
        if bytes <= 0 {
            return Err(WorkloadError::InvalidConfiguration(format!(
                "transfer size must be greater than 0, got {}",
                bytes
            )));
        }
        self.transfer_size = bytes;
        Ok(self)
    }

    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Only keep jobs for which `predicate` returns true
    pub fn with_predicate(mut self, predicate: impl Fn(&JobSpec) -> bool + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn mips_rate(&self) -> i64 {
        self.mips_rate
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn transfer_size(&self) -> i64 {
        self.transfer_size
    }

    pub fn comment_marker(&self) -> char {
        self.comment_marker
    }

    pub fn accepts(&self, job: &JobSpec) -> bool {
        (self.predicate)(job)
    }

    pub(crate) fn replace_predicate(&mut self, predicate: Predicate) {
        self.predicate = predicate;
    }
}

impl fmt::Debug for WorkloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkloadConfig")
            .field("mips_rate", &self.mips_rate)
            .field("columns", &self.columns)
            .field("transfer_size", &self.transfer_size)
            .field("comment_marker", &self.comment_marker)
            .finish_non_exhaustive()
    }
}
