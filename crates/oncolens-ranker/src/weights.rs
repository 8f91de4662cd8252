//! Fixed model parameter table.
//! One (weight, mean, std) entry per measurement, in canonical feature order.

use oncolens_common::{Feature, OncolensError, Result, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Weight and normalisation statistics for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    pub weight: f64,
    pub mean: f64,
    /// Must be > 0.
    pub std: f64,
}

impl FeatureParams {
    pub const fn new(weight: f64, mean: f64, std: f64) -> Self {
        Self { weight, mean, std }
    }
}

/// Built-in table, indexed by `Feature::index()`.
const BUILTIN: [FeatureParams; FEATURE_COUNT] = [
    FeatureParams::new(0.15, 14.13, 3.52),    // meanRadius
    FeatureParams::new(0.08, 19.29, 4.30),    // meanTexture
    FeatureParams::new(0.18, 91.97, 24.30),   // meanPerimeter
    FeatureParams::new(0.12, 654.89, 351.91), // meanArea
    FeatureParams::new(0.06, 0.096, 0.014),   // meanSmoothness
    FeatureParams::new(0.16, 16.27, 4.83),    // worstRadius
    FeatureParams::new(0.05, 25.68, 6.15),    // worstTexture
    FeatureParams::new(0.14, 107.26, 33.60),  // worstPerimeter
    FeatureParams::new(0.11, 880.58, 569.36), // worstArea
    FeatureParams::new(0.04, 0.132, 0.023),   // worstSmoothness
];

/// Immutable model parameters shared read-only by every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    entries: [FeatureParams; FEATURE_COUNT],
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self { entries: BUILTIN }
    }
}

impl ModelParameters {
    pub fn new(entries: [FeatureParams; FEATURE_COUNT]) -> Self {
        Self { entries }
    }

    pub fn get(&self, feature: Feature) -> &FeatureParams {
        &self.entries[feature.index()]
    }

    /// (feature, params) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureParams)> {
        Feature::ALL.into_iter().zip(self.entries.iter())
    }

    pub fn weights(&self) -> [f64; FEATURE_COUNT] {
        self.entries.map(|p| p.weight)
    }

    /// Every entry must be finite with std > 0.
    pub fn validate(&self) -> Result<()> {
        for (feature, p) in self.iter() {
            if !(p.weight.is_finite() && p.mean.is_finite()) {
                return Err(OncolensError::InvalidModel {
                    field: feature,
                    reason: "weight and mean must be finite".to_string(),
                });
            }
            if !(p.std.is_finite() && p.std > 0.0) {
                return Err(OncolensError::InvalidModel {
                    field: feature,
                    reason: format!("std must be finite and > 0, got {}", p.std),
                });
            }
        }
        Ok(())
    }
}
