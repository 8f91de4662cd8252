/// Core record and prediction types shared by the scorer, the batch runner
/// and whatever renders the results.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OncolensError, Result};
use crate::features::{Feature, FEATURE_COUNT};

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// The ten required numeric fields of one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub mean_radius: f64,
    pub mean_texture: f64,
    pub mean_perimeter: f64,
    pub mean_area: f64,
    pub mean_smoothness: f64,
    pub worst_radius: f64,
    pub worst_texture: f64,
    pub worst_perimeter: f64,
    pub worst_area: f64,
    pub worst_smoothness: f64,
}

impl Measurements {
    /// Build from values in canonical feature order.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [
            mean_radius,
            mean_texture,
            mean_perimeter,
            mean_area,
            mean_smoothness,
            worst_radius,
            worst_texture,
            worst_perimeter,
            worst_area,
            worst_smoothness,
        ] = values;
        Self {
            mean_radius,
            mean_texture,
            mean_perimeter,
            mean_area,
            mean_smoothness,
            worst_radius,
            worst_texture,
            worst_perimeter,
            worst_area,
            worst_smoothness,
        }
    }

    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.mean_radius,
            self.mean_texture,
            self.mean_perimeter,
            self.mean_area,
            self.mean_smoothness,
            self.worst_radius,
            self.worst_texture,
            self.worst_perimeter,
            self.worst_area,
            self.worst_smoothness,
        ]
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.as_array()[feature.index()]
    }

    /// Fails on the first non-finite value, in canonical order.
    pub fn validate(&self) -> Result<()> {
        for feature in Feature::ALL {
            let value = self.get(feature);
            if !value.is_finite() {
                return Err(OncolensError::NonFiniteField { field: feature, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One subject's measurements plus identifying metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl Record {
    /// Validated construction: non-empty id, all measurements finite.
    pub fn new(id: impl Into<String>, measurements: Measurements) -> Result<Self> {
        let record = Self {
            id: id.into(),
            name: None,
            age: None,
            measurements,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(OncolensError::EmptyIdentifier);
        }
        self.measurements.validate()
    }

    /// Parse a single record from JSON. Missing measurement keys are a
    /// deserialisation error; nothing is zero-filled.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: Record = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Prediction output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Benign,
    Malignant,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Benign => "Benign",
            Label::Malignant => "Malignant",
        }
    }

    pub fn parse(s: &str) -> Option<Label> {
        match s.trim() {
            "Benign" => Some(Label::Benign),
            "Malignant" => Some(Label::Malignant),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contribution of one feature to one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureContribution {
    pub feature: Feature,
    /// Display name, e.g. "Mean Radius".
    pub name: String,
    /// |z · weight|
    pub importance: f64,
    pub raw_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub label: Label,
    /// Confidence in the reported label, not the malignancy probability.
    pub probability: f64,
    /// |p_raw − 0.5| × 2
    pub confidence: f64,
    /// All ten features, sorted by descending importance.
    pub features: Vec<FeatureContribution>,
    /// Linear score s before the sigmoid.
    pub raw_score: f64,
    /// p_raw = sigmoid(s)
    pub malignancy_probability: f64,
}

impl PredictionResult {
    pub fn top_features(&self, n: usize) -> &[FeatureContribution] {
        &self.features[..n.min(self.features.len())]
    }

    pub fn is_malignant(&self) -> bool {
        self.label == Label::Malignant
    }
}

/// Input for a single-record report renderer. Renderers must not mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub record: Record,
    pub result: PredictionResult,
    pub generated_at: DateTime<Utc>,
}

impl PredictionReport {
    pub fn new(record: Record, result: PredictionResult) -> Self {
        Self {
            record,
            result,
            generated_at: Utc::now(),
        }
    }
}
