//! Historical scheduling outcomes and the pattern bonus they produce.
//!
//! Past meetings nudge new slots toward the hours and weekdays that have
//! worked before. The bonus is additive and capped so history can never
//! outweigh the base preferences.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::HistoryConfig;

/// A past meeting and whether it went ahead successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalOutcome {
    pub start: NaiveDateTime,
    #[serde(default)]
    pub completed_successfully: bool,
}

impl HistoricalOutcome {
    pub fn new(start: NaiveDateTime, completed_successfully: bool) -> Self {
        Self {
            start,
            completed_successfully,
        }
    }
}

/// Sum the per-outcome bonuses for a slot starting at `slot_start`, capped at
/// `config.max_bonus`.
///
/// Hour distance is plain subtraction of hours of day, so 23:00 and 00:00
/// are 23 hours apart.
pub fn historical_bonus(
    slot_start: NaiveDateTime,
    outcomes: &[HistoricalOutcome],
    config: &HistoryConfig,
) -> f64 {
    let slot_hour = slot_start.hour();
    let slot_weekday = slot_start.weekday();

    let total: f64 = outcomes
        .iter()
        .map(|outcome| {
            let mut bonus = 0.0;
            if outcome.start.hour().abs_diff(slot_hour) <= config.hour_tolerance {
                bonus += config.hour_match_bonus;
            }
            if outcome.start.weekday() == slot_weekday {
                bonus += config.weekday_match_bonus;
            }
            if outcome.completed_successfully {
                bonus += config.success_bonus;
            }
            bonus
        })
        .sum();

    total.min(config.max_bonus)
}
