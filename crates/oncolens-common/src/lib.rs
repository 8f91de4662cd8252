//! oncolens-common — Shared types and errors used across all Oncolens crates.

pub mod error;
pub mod features;
pub mod entities;

// Re-export commonly used types
pub use error::{OncolensError, Result};
pub use features::{display_name, Feature, FEATURE_COUNT};
pub use entities::{
    FeatureContribution, Label, Measurements, PredictionReport, PredictionResult, Record,
};
