//! Slot desirability scoring.
//!
//! The rule score of a slot is built in a fixed order:
//!
//! ```text
//! weighted_base = (time_of_day + weekday) * priority_weight
//! pre_blend     = weighted_base + historical          (historical <= cap)
//! total         = predictor.blend(pre_blend)
//! ```
//!
//! With no trained model the predictor returns `pre_blend` unchanged. With a
//! trained model the total is `0.3 * pre_blend + 0.7 * probability * 100`
//! under the default blend weights.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::history::{historical_bonus, HistoricalOutcome};
use crate::overlap::OverlapSlot;
use crate::predictor::{SlotFeatures, SuccessPredictor};
use crate::profile::RequesterProfile;

/// Per-signal contributions behind a slot's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub time_of_day: f64,
    pub weekday: f64,
    pub priority_weight: f64,
    /// `(time_of_day + weekday) * priority_weight`
    pub weighted_base: f64,
    pub historical: f64,
    /// Rule score before any model blend
    pub pre_blend: f64,
    pub model_probability: Option<f64>,
    pub total: f64,
}

/// An overlap slot with its desirability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSlot {
    #[serde(flatten)]
    pub slot: OverlapSlot,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredSlot {
    pub fn start(&self) -> NaiveDateTime {
        self.slot.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.slot.end
    }

    /// Meeting interval of `duration_minutes` starting at the slot start,
    /// or `None` if it would run past the slot end.
    pub fn propose_meeting(&self, duration_minutes: i64) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if duration_minutes <= 0 || !self.slot.can_fit(duration_minutes) {
            return None;
        }
        let start = self.slot.start;
        Some((start, start + Duration::minutes(duration_minutes)))
    }
}

/// Rule-based scorer with an optional model blend.
#[derive(Debug, Clone, Default)]
pub struct SlotScorer {
    config: ScoringConfig,
}

impl SlotScorer {
    /// Create a scorer with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Bonus for the hour a slot starts.
    pub fn time_of_day_bonus(&self, hour: u32) -> f64 {
        let tod = &self.config.time_of_day;
        if tod.prime_hours.contains(&hour) {
            tod.prime_bonus
        } else if (tod.business_start_hour..=tod.business_end_hour).contains(&hour) {
            tod.business_bonus
        } else {
            tod.off_hours_bonus
        }
    }

    /// Bonus for the weekday a slot starts (0-6, Monday=0).
    pub fn weekday_bonus(&self, weekday: u32) -> f64 {
        let mut bonus = 0.0;
        if weekday <= 4 {
            bonus += self.config.weekday.workday_bonus;
            if (1..=3).contains(&weekday) {
                bonus += self.config.weekday.midweek_bonus;
            }
        }
        bonus
    }

    /// Score one slot.
    pub fn score_slot(
        &self,
        slot: &OverlapSlot,
        profile: &RequesterProfile,
        history: Option<&[HistoricalOutcome]>,
        predictor: &dyn SuccessPredictor,
    ) -> ScoredSlot {
        let time_of_day = self.time_of_day_bonus(slot.start.hour());
        let weekday = self.weekday_bonus(slot.start.weekday().num_days_from_monday());
        let priority_weight = self.config.priority.weight_for(profile.priority);
        let weighted_base = (time_of_day + weekday) * priority_weight;

        let historical = match history {
            Some(outcomes) if !outcomes.is_empty() => {
                historical_bonus(slot.start, outcomes, &self.config.history)
            }
            _ => 0.0,
        };
        let pre_blend = weighted_base + historical;

        let level = profile
            .level
            .as_deref()
            .unwrap_or(&self.config.default_candidate_level);
        let features = SlotFeatures::new(slot.start, &slot.interviewer_id, level);
        let blended = predictor.blend(pre_blend, &features, &self.config.blend);

        ScoredSlot {
            slot: slot.clone(),
            score: blended.score,
            breakdown: ScoreBreakdown {
                time_of_day,
                weekday,
                priority_weight,
                weighted_base,
                historical,
                pre_blend,
                model_probability: blended.probability,
                total: blended.score,
            },
        }
    }

    /// Score every slot and sort by score descending.
    ///
    /// The sort is stable: equal scores keep the order of `slots`.
    pub fn score_all(
        &self,
        slots: &[OverlapSlot],
        profile: &RequesterProfile,
        history: Option<&[HistoricalOutcome]>,
        predictor: &dyn SuccessPredictor,
    ) -> Vec<ScoredSlot> {
        let mut scored: Vec<ScoredSlot> = slots
            .iter()
            .map(|slot| self.score_slot(slot, profile, history, predictor))
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }
}
