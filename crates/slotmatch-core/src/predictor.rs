//! Success predictors that refine the rule-based slot score.
//!
//! A predictor is chosen per scoring call. [`NoModel`] leaves the rule
//! score alone; a trained model (see [`crate::model::TrainedModel`]) blends
//! its success probability into it.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::config::BlendWeights;

/// Features of a slot as seen by a success model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFeatures<'a> {
    /// Day of week (0-6, Monday=0)
    pub weekday: u32,
    /// Hour of day (0-23)
    pub hour: u32,
    pub interviewer_id: &'a str,
    pub candidate_level: &'a str,
}

impl<'a> SlotFeatures<'a> {
    pub fn new(
        start: NaiveDateTime,
        interviewer_id: &'a str,
        candidate_level: &'a str,
    ) -> Self {
        Self {
            weekday: start.weekday().num_days_from_monday(),
            hour: start.hour(),
            interviewer_id,
            candidate_level,
        }
    }
}

/// Result of passing a rule score through a predictor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendOutcome {
    pub score: f64,
    /// Class-1 probability, if the predictor produced one
    pub probability: Option<f64>,
}

/// Capability to turn a rule score into a final score.
///
/// Implementations are immutable once built and may be read from many
/// threads at once.
pub trait SuccessPredictor: fmt::Debug + Send + Sync {
    /// Final score for a slot whose rule score is `rule_score`.
    fn blend(&self, rule_score: f64, features: &SlotFeatures<'_>, weights: &BlendWeights) -> BlendOutcome;

    /// Whether this predictor was fitted on data.
    fn is_trained(&self) -> bool {
        false
    }
}

/// Predictor used before any model has been trained.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModel;

impl SuccessPredictor for NoModel {
    fn blend(&self, rule_score: f64, _features: &SlotFeatures<'_>, _weights: &BlendWeights) -> BlendOutcome {
        BlendOutcome {
            score: rule_score,
            probability: None,
        }
    }
}

/// `rule_weight * rule_score + model_weight * probability * 100`.
pub fn blend_probability(rule_score: f64, probability: f64, weights: &BlendWeights) -> f64 {
    weights.rule_weight * rule_score + weights.model_weight * (probability * 100.0)
}
