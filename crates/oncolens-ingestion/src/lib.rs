//! oncolens-ingestion — Batch ingestion of delimited measurement documents.
//! - Header layout resolution (columns matched by name)
//! - Per-row parsing with fault isolation
//! - Scoring fold into a `BatchOutcome`
//! - CSV export of results
//! - Caller-side summary aggregation

pub mod batch;
pub mod error;
pub mod export;
pub mod sample;
pub mod summary;

pub use batch::{BatchLayout, BatchOutcome, BatchPrediction, BatchRunner, SkippedRow};
pub use error::{BatchError, Result, SkipReason};
pub use export::{export_predictions, export_records};
pub use sample::SAMPLE_BATCH_CSV;
pub use summary::BatchSummary;
