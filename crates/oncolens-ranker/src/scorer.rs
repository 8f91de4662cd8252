//! Malignancy prediction for a single record.
//!
//! s = Σ(z_f × w_f),  p_raw = sigmoid(s)
//! label = Malignant iff p_raw > 0.5 (exact 0.5 resolves to Benign)
//! probability = confidence in the reported label
//! confidence = |p_raw − 0.5| × 2

use std::cmp::Ordering;

use oncolens_common::{
    Feature, FeatureContribution, Label, Measurements, OncolensError, PredictionResult, Record,
    Result, FEATURE_COUNT,
};
use tracing::debug;

use crate::normalise::{normalise_measurements, sigmoid};
use crate::weights::ModelParameters;

/// Pure scoring function over an immutable parameter table.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    params: ModelParameters,
}

impl Scorer {
    /// Create a scorer after validating the table.
    pub fn new(params: ModelParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Score a record. Fails on an empty id or any non-finite measurement.
    pub fn predict_record(&self, record: &Record) -> Result<PredictionResult> {
        record.validate()?;
        self.predict(&record.measurements)
    }

    /// Score raw measurements. Fails on any non-finite value rather than
    /// substituting zero, including finite inputs large enough that their
    /// weighted z-score or the summed score overflows.
    pub fn predict(&self, measurements: &Measurements) -> Result<PredictionResult> {
        measurements.validate()?;

        let z = normalise_measurements(measurements, &self.params);
        let weights = self.params.weights();

        let mut terms = [0.0f64; FEATURE_COUNT];
        for f in Feature::ALL {
            let term = z[f.index()] * weights[f.index()];
            if !term.is_finite() {
                return Err(OncolensError::NonFiniteContribution { field: f, contribution: term });
            }
            terms[f.index()] = term;
        }

        // Left-to-right in canonical order.
        let raw_score: f64 = terms.iter().sum();
        if !raw_score.is_finite() {
            return Err(OncolensError::NonFiniteScore(raw_score));
        }
        let p_raw = sigmoid(raw_score);

        let label = if p_raw > 0.5 { Label::Malignant } else { Label::Benign };
        let probability = match label {
            Label::Malignant => p_raw,
            Label::Benign => 1.0 - p_raw,
        };
        let confidence = (p_raw - 0.5).abs() * 2.0;

        let mut features: Vec<FeatureContribution> = Feature::ALL
            .iter()
            .map(|&f| FeatureContribution {
                feature: f,
                name: f.display_name(),
                importance: terms[f.index()].abs(),
                raw_value: measurements.get(f),
            })
            .collect();
        // Stable: ties keep canonical order.
        features.sort_by(|a, b| b.importance.partial_cmp(&a.importance).unwrap_or(Ordering::Equal));

        debug!(score = raw_score, p_raw, %label, "scored record");

        Ok(PredictionResult {
            label,
            probability,
            confidence,
            features,
            raw_score,
            malignancy_probability: p_raw,
        })
    }
}
