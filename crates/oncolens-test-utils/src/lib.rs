//! Shared fixtures for Oncolens tests.

use oncolens_common::{Feature, Measurements};
use rand::Rng;

pub use pretty_assertions::assert_eq;

/// Training means of the built-in model, canonical order.
pub const TRAINING_MEANS: [f64; 10] = [
    14.13, 19.29, 91.97, 654.89, 0.096, 16.27, 25.68, 107.26, 880.58, 0.132,
];

/// Training standard deviations of the built-in model, canonical order.
pub const TRAINING_STDS: [f64; 10] = [
    3.52, 4.30, 24.30, 351.91, 0.014, 4.83, 6.15, 33.60, 569.36, 0.023,
];

/// Header with `id` and the ten measurement columns.
pub const ID_HEADER: &str = "id,meanRadius,meanTexture,meanPerimeter,meanArea,meanSmoothness,\
worstRadius,worstTexture,worstPerimeter,worstArea,worstSmoothness";

/// A row near the training means; scores close to the decision boundary.
pub const NEAR_MEAN_ROW: &str = "P1,14.0,19.0,92.0,655.0,0.096,16.0,26.0,107.0,881.0,0.132";

/// Exactly on the training means: score 0, p_raw 0.5.
pub fn mean_measurements() -> Measurements {
    Measurements::from_array(TRAINING_MEANS)
}

pub fn near_mean_measurements() -> Measurements {
    Measurements::from_array([14.0, 19.0, 92.0, 655.0, 0.096, 16.0, 26.0, 107.0, 881.0, 0.132])
}

/// Every measurement well above its mean.
pub fn malignant_measurements() -> Measurements {
    Measurements::from_array([20.6, 29.3, 140.1, 1265.0, 0.117, 25.7, 39.4, 184.6, 1821.0, 0.165])
}

/// Every measurement well below its mean.
pub fn benign_measurements() -> Measurements {
    Measurements::from_array([11.4, 14.9, 73.5, 402.3, 0.081, 12.3, 19.7, 79.8, 467.5, 0.106])
}

/// Random finite measurements within ±4 std of the training means.
pub fn random_measurements<R: Rng>(rng: &mut R) -> Measurements {
    let mut values = [0.0; 10];
    for f in Feature::ALL {
        let i = f.index();
        values[i] = TRAINING_MEANS[i] + rng.gen_range(-4.0..4.0) * TRAINING_STDS[i];
    }
    Measurements::from_array(values)
}

/// Comma-joined measurement values in canonical order.
pub fn measurement_fields(m: &Measurements) -> String {
    m.as_array()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Join a header and rows into a batch document.
pub fn batch_document(header: &str, rows: &[&str]) -> String {
    let mut doc = String::from(header);
    for row in rows {
        doc.push('\n');
        doc.push_str(row);
    }
    doc.push('\n');
    doc
}
