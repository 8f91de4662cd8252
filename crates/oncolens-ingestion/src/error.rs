//! Batch error types.

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BatchError>;

/// Run-level failures. No partial outcome is produced.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV file must contain at least a header row and one data row")]
    EmptyDocument,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export flush failed: {0}")]
    ExportFlush(#[from] csv::IntoInnerError<csv::Writer<Vec<u8>>>),

    #[error("Export is not valid UTF-8: {0}")]
    ExportEncoding(#[from] std::string::FromUtf8Error),
}

/// Why a single row was skipped. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("incorrect number of columns: expected {expected}, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {column} is not a finite number: {value:?}")]
    InvalidNumber { column: String, value: String },

    #[error("malformed row: {message}")]
    Malformed { message: String },

    #[error("scoring failed: {message}")]
    Scoring { message: String },
}
