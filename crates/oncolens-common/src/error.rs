use thiserror::Error;

use crate::features::Feature;

#[derive(Debug, Error)]
pub enum OncolensError {
    #[error("Field {field} is not a finite number: {value}")]
    NonFiniteField { field: Feature, value: f64 },

    #[error("Field {field} is out of range for the model: weighted z-score is {contribution}")]
    NonFiniteContribution { field: Feature, contribution: f64 },

    #[error("Linear score overflowed: {0}")]
    NonFiniteScore(f64),

    #[error("Record identifier must not be empty")]
    EmptyIdentifier,

    #[error("Invalid model parameters for {field}: {reason}")]
    InvalidModel { field: Feature, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OncolensError>;
