//! Caller-side aggregation over a batch outcome.
//! Kept outside the runner so the runner only parses and scores.

use serde::Serialize;

use oncolens_common::Label;

use crate::batch::{BatchOutcome, BatchPrediction};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub scored: usize,
    pub skipped: usize,
    pub benign: usize,
    pub malignant: usize,
    /// 0 when nothing was scored.
    pub mean_probability: f64,
    pub mean_confidence: f64,
}

impl BatchSummary {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            skipped: outcome.skipped_count(),
            ..Self::from_predictions(&outcome.predictions)
        }
    }

    pub fn from_predictions(predictions: &[BatchPrediction]) -> Self {
        let count = |label: Label| predictions.iter().filter(|p| p.result.label == label).count();
        let mean = |f: fn(&BatchPrediction) -> f64| {
            if predictions.is_empty() {
                0.0
            } else {
                predictions.iter().map(f).sum::<f64>() / predictions.len() as f64
            }
        };

        Self {
            scored: predictions.len(),
            skipped: 0,
            benign: count(Label::Benign),
            malignant: count(Label::Malignant),
            mean_probability: mean(|p| p.result.probability),
            mean_confidence: mean(|p| p.result.confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchRunner;
    use oncolens_ranker::Scorer;
    use oncolens_test_utils::{batch_document, ID_HEADER, NEAR_MEAN_ROW};

    #[test]
    fn test_counts_by_label() {
        let scorer = Scorer::default();
        let doc = batch_document(
            ID_HEADER,
            &[
                NEAR_MEAN_ROW,
                "P2,20.6,29.3,140.1,1265.0,0.117,25.7,39.4,184.6,1821.0,0.165",
                "P3,20.6,29.3",
                "P4,11.4,14.9,73.5,402.3,0.081,12.3,19.7,79.8,467.5,0.106",
            ],
        );
        let outcome = BatchRunner::new(&scorer).run(&doc).unwrap();
        let summary = BatchSummary::from_outcome(&outcome);
        assert_eq!(summary.scored, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.benign, 2);
        assert_eq!(summary.malignant, 1);
        assert_eq!(summary.benign + summary.malignant, summary.scored);
        assert!(summary.mean_probability >= 0.5 && summary.mean_probability <= 1.0);
    }

    #[test]
    fn test_empty_predictions() {
        let summary = BatchSummary::from_predictions(&[]);
        assert_eq!(summary.scored, 0);
        assert_eq!(summary.mean_probability, 0.0);
        assert_eq!(summary.mean_confidence, 0.0);
    }
}
