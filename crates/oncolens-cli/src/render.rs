//! Plain-text and JSON rendering of results for the terminal.

use std::fmt::Write;

use serde::Serialize;

use oncolens_common::{Feature, PredictionReport};
use oncolens_ingestion::{BatchOutcome, BatchSummary};
use oncolens_ranker::{DatasetInfo, ModelMetrics, ModelParameters};

use crate::config::OutputConfig;

pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

pub fn prediction_table(report: &PredictionReport, output: &OutputConfig) -> String {
    let mut out = String::new();
    let record = &report.record;
    let result = &report.result;
    let dp = output.probability_decimals;

    let _ = writeln!(out, "Patient ID:  {}", record.id);
    if let Some(name) = &record.name {
        let _ = writeln!(out, "Name:        {}", name);
    }
    if let Some(age) = record.age {
        let _ = writeln!(out, "Age:         {}", age);
    }
    let _ = writeln!(out, "Prediction:  {}", result.label);
    let _ = writeln!(out, "Probability: {}", percent(result.probability, dp));
    let _ = writeln!(out, "Confidence:  {}", percent(result.confidence, dp));
    let _ = writeln!(out);
    let _ = writeln!(out, "Top features:");
    for (i, c) in result.top_features(output.top_features).iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<18} importance {:.4}  value {:.3}",
            i + 1,
            c.name,
            c.importance,
            c.raw_value
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    out
}

pub fn batch_table(outcome: &BatchOutcome, summary: &BatchSummary, output: &OutputConfig) -> String {
    let mut out = String::new();
    let dp = output.probability_decimals;

    let _ = writeln!(out, "Total predictions: {}", summary.scored);
    let _ = writeln!(out, "Benign:            {}", summary.benign);
    let _ = writeln!(out, "Malignant:         {}", summary.malignant);
    let _ = writeln!(out, "Skipped rows:      {}", summary.skipped);
    if outcome.interrupted {
        let _ = writeln!(out, "(interrupted after {} rows)", outcome.rows_seen);
    }
    let _ = writeln!(out);

    if !outcome.predictions.is_empty() {
        let _ = writeln!(
            out,
            "{:<20} {:<20} {:>4}  {:<10} {:>11} {:>11}",
            "ID", "Name", "Age", "Prediction", "Probability", "Confidence"
        );
        for p in &outcome.predictions {
            let _ = writeln!(
                out,
                "{:<20} {:<20} {:>4}  {:<10} {:>11} {:>11}",
                p.record.id,
                p.record.name.as_deref().unwrap_or("-"),
                p.record.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
                p.result.label.as_str(),
                percent(p.result.probability, dp),
                percent(p.result.confidence, dp),
            );
        }
    }

    if !outcome.skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Skipped:");
        for s in &outcome.skipped {
            let _ = writeln!(out, "  Row {}: {}", s.row, s.reason);
        }
    }
    out
}

pub fn model_info_table(params: &ModelParameters, metrics: &ModelMetrics, dataset: &DatasetInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<18} {:>8} {:>10} {:>10}", "Feature", "Weight", "Mean", "Std");
    for (feature, p) in params.iter() {
        let _ = writeln!(
            out,
            "{:<18} {:>8.2} {:>10.3} {:>10.3}",
            Feature::display_name(feature),
            p.weight,
            p.mean,
            p.std
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Accuracy:  {:.3}", metrics.accuracy);
    let _ = writeln!(out, "Precision: {:.3}", metrics.precision);
    let _ = writeln!(out, "Recall:    {:.3}", metrics.recall);
    let _ = writeln!(out, "F1-Score:  {:.3}", metrics.f1_score);
    let _ = writeln!(out, "ROC AUC:   {:.3}", metrics.roc_auc);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Training data: {} samples ({} benign, {} malignant), {} source features",
        dataset.total_samples, dataset.benign_count, dataset.malignant_count, dataset.features
    );
    out
}

/// Serialised shape of `model-info --format json`.
#[derive(Serialize)]
pub struct ModelInfo<'a> {
    pub parameters: Vec<ParameterRow>,
    pub metrics: &'a ModelMetrics,
    pub dataset: &'a DatasetInfo,
}

#[derive(Serialize)]
pub struct ParameterRow {
    pub feature: Feature,
    pub name: String,
    pub weight: f64,
    pub mean: f64,
    pub std: f64,
}

impl<'a> ModelInfo<'a> {
    pub fn new(params: &ModelParameters, metrics: &'a ModelMetrics, dataset: &'a DatasetInfo) -> Self {
        let parameters = params
            .iter()
            .map(|(feature, p)| ParameterRow {
                feature,
                name: feature.display_name(),
                weight: p.weight,
                mean: p.mean,
                std: p.std,
            })
            .collect();
        Self { parameters, metrics, dataset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncolens_common::{Measurements, Record};
    use oncolens_ingestion::{BatchRunner, SAMPLE_BATCH_CSV};
    use oncolens_ranker::{dataset_info, model_metrics, Scorer};

    #[test]
    fn test_prediction_table_lists_top_features() {
        let record = Record::new(
            "P1",
            Measurements::from_array([14.0, 19.0, 92.0, 655.0, 0.096, 16.0, 26.0, 107.0, 881.0, 0.132]),
        )
        .unwrap()
        .with_name("Jane");
        let result = Scorer::default().predict_record(&record).unwrap();
        let report = PredictionReport::new(record, result);
        let output = OutputConfig { top_features: 3, ..OutputConfig::default() };

        let text = prediction_table(&report, &output);
        assert!(text.contains("Patient ID:  P1"));
        assert!(text.contains("Name:        Jane"));
        assert!(text.contains("Prediction:  Benign"));
        assert!(text.contains("   3. "));
        assert!(!text.contains("   4. "));
    }

    #[test]
    fn test_batch_table_counts() {
        let scorer = Scorer::default();
        let doc = format!("{}bad,row\n", SAMPLE_BATCH_CSV);
        let outcome = BatchRunner::new(&scorer).run(&doc).unwrap();
        let summary = BatchSummary::from_outcome(&outcome);
        let text = batch_table(&outcome, &summary, &OutputConfig::default());
        assert!(text.contains("Total predictions: 3"));
        assert!(text.contains("Skipped rows:      1"));
        assert!(text.contains("Row 5: incorrect number of columns"));
        assert!(text.contains("Patient Three"));
    }

    #[test]
    fn test_model_info_json_has_ten_rows() {
        let metrics = model_metrics();
        let dataset = dataset_info();
        let info = ModelInfo::new(&ModelParameters::default(), &metrics, &dataset);
        let json = to_json(&info).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["parameters"].as_array().unwrap().len(), 10);
        assert_eq!(value["parameters"][0]["feature"], "meanRadius");
        assert_eq!(value["parameters"][0]["name"], "Mean Radius");
        assert_eq!(value["dataset"]["total_samples"], 569);
    }
}
