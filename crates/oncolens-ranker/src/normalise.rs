//! Feature normalisation and the logistic link.

use oncolens_common::{Feature, Measurements, FEATURE_COUNT};

use crate::weights::ModelParameters;

/// z = (value − mean) / std. Caller guarantees std > 0.
pub fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    (value - mean) / std
}

/// Normalise all ten measurements, canonical order.
pub fn normalise_measurements(
    measurements: &Measurements,
    params: &ModelParameters,
) -> [f64; FEATURE_COUNT] {
    Feature::ALL.map(|f| {
        let p = params.get(f);
        z_score(measurements.get(f), p.mean, p.std)
    })
}

/// Logistic sigmoid 1 / (1 + e^(−s)).
pub fn sigmoid(score: f64) -> f64 {
    1.0 / (1.0 + (-score).exp())
}
