//! Error types for the reporting CLI.

use std::path::PathBuf;

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Everything that can stop a report from being produced.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid report configuration.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read an input file.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Other I/O failure (stdin).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sales export is not valid JSON or does not match the schema.
    #[error("Failed to parse sales export: {0}")]
    InvalidExport(#[from] serde_json::Error),

    /// Failed to parse config file.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The export is larger than the configured cap.
    #[error("Sales export has {count} transactions, more than the configured maximum of {max}")]
    TooManyTransactions { count: usize, max: usize },

    /// Reporting failure from the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for ReportError {
    fn from(error: ValidationError) -> Self {
        ReportError::Core(error.into())
    }
}
