//! oncolens-ranker — Malignancy scoring engine.
//! Normalises the ten measurements, applies the fixed linear model and
//! ranks per-feature contributions.

pub mod scorer;
pub mod normalise;
pub mod weights;
pub mod metrics;

pub use scorer::Scorer;
pub use weights::{FeatureParams, ModelParameters};
pub use metrics::{dataset_info, model_metrics, DatasetInfo, ModelMetrics};
