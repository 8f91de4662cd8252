//! Published evaluation figures for the built-in model.
//! Informational only; nothing here is recomputed at runtime.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub roc_auc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub total_samples: u32,
    pub benign_count: u32,
    pub malignant_count: u32,
    /// Features in the source dataset; the model uses 10 of them.
    pub features: u32,
}

impl DatasetInfo {
    pub fn is_consistent(&self) -> bool {
        self.benign_count + self.malignant_count == self.total_samples
    }
}

pub fn model_metrics() -> ModelMetrics {
    ModelMetrics {
        accuracy: 0.954,
        precision: 0.942,
        recall: 0.963,
        f1_score: 0.952,
        roc_auc: 0.978,
    }
}

pub fn dataset_info() -> DatasetInfo {
    DatasetInfo {
        total_samples: 569,
        benign_count: 357,
        malignant_count: 212,
        features: 30,
    }
}
