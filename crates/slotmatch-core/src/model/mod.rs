//! Success model learned from past interviews.
//!
//! Predicts whether a meeting in a given slot will complete successfully
//! from its weekday, hour, interviewer and candidate level. The model is a
//! seeded random forest over one-hot encoded categories.

mod encoder;
mod forest;
mod tree;

pub use encoder::CategoryEncoder;
pub use forest::RandomForest;
pub use tree::{DecisionTree, TreeParams};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::{BlendWeights, ModelConfig};
use crate::error::ValidationError;
use crate::predictor::{blend_probability, BlendOutcome, SlotFeatures, SuccessPredictor};

/// One past interview used for training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub slot_start: NaiveDateTime,
    pub interviewer_id: String,
    pub candidate_level: String,
    pub completed_successfully: bool,
}

impl TrainingRecord {
    pub fn features(&self) -> SlotFeatures<'_> {
        SlotFeatures::new(self.slot_start, &self.interviewer_id, &self.candidate_level)
    }
}

/// Fits [`TrainedModel`]s.
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer {
    config: ModelConfig,
}

impl ModelTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Fit a model on `records`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InsufficientTrainingData`] when there are
    /// fewer than `min_training_records` records.
    pub fn train(&self, records: &[TrainingRecord]) -> Result<TrainedModel, ValidationError> {
        if records.len() < self.config.min_training_records {
            return Err(ValidationError::InsufficientTrainingData {
                required: self.config.min_training_records,
                actual: records.len(),
            });
        }

        let encoder = CategoryEncoder::fit(
            records
                .iter()
                .map(|r| (r.interviewer_id.as_str(), r.candidate_level.as_str())),
        );
        let rows: Vec<Vec<f64>> = records.iter().map(|r| encoder.encode(&r.features())).collect();
        let labels: Vec<bool> = records.iter().map(|r| r.completed_successfully).collect();
        let forest = RandomForest::fit(&rows, &labels, &self.config);

        Ok(TrainedModel {
            encoder,
            forest,
            trained_on: records.len(),
        })
    }
}

/// Immutable fitted model.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    encoder: CategoryEncoder,
    forest: RandomForest,
    trained_on: usize,
}

impl TrainedModel {
    /// Probability that a meeting with these features completes successfully.
    pub fn predict_probability(&self, features: &SlotFeatures<'_>) -> f64 {
        self.forest.predict_probability(&self.encoder.encode(features))
    }

    /// Number of records the model was fitted on.
    pub fn trained_on(&self) -> usize {
        self.trained_on
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }
}

impl SuccessPredictor for TrainedModel {
    fn blend(&self, rule_score: f64, features: &SlotFeatures<'_>, weights: &BlendWeights) -> BlendOutcome {
        let probability = self.predict_probability(features);
        BlendOutcome {
            score: blend_probability(rule_score, probability, weights),
            probability: Some(probability),
        }
    }

    fn is_trained(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::parse_timestamp;

    fn record(start: &str, interviewer: &str, level: &str, ok: bool) -> TrainingRecord {
        TrainingRecord {
            slot_start: parse_timestamp(start).unwrap(),
            interviewer_id: interviewer.into(),
            candidate_level: level.into(),
            completed_successfully: ok,
        }
    }

    fn mixed_records() -> Vec<TrainingRecord> {
        let mut records = Vec::new();
        for day in 10..=14 {
            records.push(record(&format!("2025-03-{day}T10:00"), "R001", "senior", true));
            records.push(record(&format!("2025-03-{day}T18:00"), "R002", "junior", false));
        }
        records
    }

    #[test]
    fn refuses_small_datasets() {
        let records: Vec<_> = mixed_records().into_iter().take(5).collect();
        let err = ModelTrainer::new().train(&records).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientTrainingData {
                required: 10,
                actual: 5
            }
        );
    }

    #[test]
    fn trains_on_ten_records() {
        let model = ModelTrainer::new().train(&mixed_records()).unwrap();
        assert_eq!(model.trained_on(), 10);
        assert_eq!(model.encoder().interviewers(), ["R001", "R002"]);
        assert!(model.is_trained());
    }

    #[test]
    fn separates_good_and_bad_patterns() {
        let model = ModelTrainer::new().train(&mixed_records()).unwrap();
        let start = parse_timestamp("2025-03-19T10:00").unwrap();
        let good = model.predict_probability(&SlotFeatures::new(start, "R001", "senior"));
        let evening = parse_timestamp("2025-03-19T18:00").unwrap();
        let bad = model.predict_probability(&SlotFeatures::new(evening, "R002", "junior"));
        assert!(good > bad, "good={good} bad={bad}");
    }

    #[test]
    fn unseen_categories_still_predict() {
        let model = ModelTrainer::new().train(&mixed_records()).unwrap();
        let start = parse_timestamp("2025-03-19T10:00").unwrap();
        let p = model.predict_probability(&SlotFeatures::new(start, "R999", "principal"));
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn blend_uses_probability() {
        let records: Vec<_> = (10..=21)
            .map(|day| record(&format!("2025-03-{day}T10:00"), "R001", "mid", true))
            .collect();
        let model = ModelTrainer::new().train(&records).unwrap();
        let start = parse_timestamp("2025-03-24T10:00").unwrap();
        let outcome = model.blend(150.0, &SlotFeatures::new(start, "R001", "mid"), &BlendWeights::default());
        assert_eq!(outcome.probability, Some(1.0));
        assert!((outcome.score - 115.0).abs() < 1e-9);
    }
}
