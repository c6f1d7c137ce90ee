//! TOML-based matcher configuration.
//!
//! Holds every tunable constant of the matcher:
//! - Minimum overlap length
//! - Time-of-day and weekday bonuses
//! - Priority weights
//! - Historical bonus increments and cap
//! - Rule/model blend weights
//! - Success model hyper-parameters
//!
//! Configuration is stored at `~/.config/slotmatch/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::profile::Priority;

/// Returns `~/.config/slotmatch[-dev]/` based on SLOTMATCH_ENV.
///
/// Set SLOTMATCH_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SLOTMATCH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("slotmatch-dev")
    } else {
        base_dir.join("slotmatch")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Overlap detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapConfig {
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: i64,
}

/// Bonus by the hour a slot starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDayConfig {
    /// Hours that earn the prime bonus
    pub prime_hours: Vec<u32>,
    /// First business hour (inclusive)
    pub business_start_hour: u32,
    /// Last business hour (inclusive)
    pub business_end_hour: u32,
    pub prime_bonus: f64,
    pub business_bonus: f64,
    pub off_hours_bonus: f64,
}

/// Bonus by the weekday a slot starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekdayConfig {
    /// Monday to Friday
    pub workday_bonus: f64,
    /// Extra on Tuesday to Thursday
    pub midweek_bonus: f64,
}

/// Multipliers keyed on requester priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    /// Used for unrecognized priorities
    pub fallback: f64,
}

/// Increments for the historical pattern bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub hour_match_bonus: f64,
    /// Maximum hour distance that still counts as a match
    pub hour_tolerance: u32,
    pub weekday_match_bonus: f64,
    pub success_bonus: f64,
    /// Cap on the summed bonus
    pub max_bonus: f64,
}

/// Weights for blending the rule score with the model probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub rule_weight: f64,
    pub model_weight: f64,
}

/// Slot scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Candidate level fed to the model when the profile has none
    #[serde(default = "default_candidate_level")]
    pub default_candidate_level: String,
    #[serde(default)]
    pub time_of_day: TimeOfDayConfig,
    #[serde(default)]
    pub weekday: WeekdayConfig,
    #[serde(default)]
    pub priority: PriorityWeights,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub blend: BlendWeights,
}

/// Success model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_min_training_records")]
    pub min_training_records: usize,
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_min_samples_split")]
    pub min_samples_split: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Matcher configuration.
///
/// Serialized to/from TOML at `~/.config/slotmatch/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub overlap: OverlapConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

// Default functions
fn default_min_duration_minutes() -> i64 {
    30
}
fn default_candidate_level() -> String {
    "mid".into()
}
fn default_min_training_records() -> usize {
    10
}
fn default_n_estimators() -> usize {
    50
}
fn default_max_depth() -> usize {
    5
}
fn default_min_samples_split() -> usize {
    2
}
fn default_seed() -> u64 {
    42
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            min_duration_minutes: default_min_duration_minutes(),
        }
    }
}

impl Default for TimeOfDayConfig {
    fn default() -> Self {
        Self {
            prime_hours: vec![10, 11, 14, 15, 16],
            business_start_hour: 9,
            business_end_hour: 17,
            prime_bonus: 30.0,
            business_bonus: 20.0,
            off_hours_bonus: 10.0,
        }
    }
}

impl Default for WeekdayConfig {
    fn default() -> Self {
        Self {
            workday_bonus: 20.0,
            midweek_bonus: 5.0,
        }
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            high: 3.0,
            medium: 2.0,
            low: 1.0,
            fallback: 1.0,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            hour_match_bonus: 5.0,
            hour_tolerance: 1,
            weekday_match_bonus: 3.0,
            success_bonus: 2.0,
            max_bonus: 25.0,
        }
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            rule_weight: 0.3,
            model_weight: 0.7,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_candidate_level: default_candidate_level(),
            time_of_day: TimeOfDayConfig::default(),
            weekday: WeekdayConfig::default(),
            priority: PriorityWeights::default(),
            history: HistoryConfig::default(),
            blend: BlendWeights::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            min_training_records: default_min_training_records(),
            n_estimators: default_n_estimators(),
            max_depth: default_max_depth(),
            min_samples_split: default_min_samples_split(),
            seed: default_seed(),
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapConfig::default(),
            scoring: ScoringConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl PriorityWeights {
    /// Multiplier for a priority.
    pub fn weight_for(&self, priority: Priority) -> f64 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
            Priority::Unrecognized => self.fallback,
        }
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

fn non_negative(key: &str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(key, format!("must be a finite non-negative number, got {value}")))
    }
}

impl MatcherConfig {
    /// Parse from a TOML string and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        let cfg: MatcherConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Persist to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the user config directory, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            return Ok(Self::load_from(&path)?);
        }

        let cfg = Self::default();
        cfg.save_to(&path)?;
        tracing::info!(path = %path.display(), "wrote default matcher configuration");
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to default matcher configuration");
                Self::default()
            }
        }
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.overlap.min_duration_minutes <= 0 {
            return Err(invalid("overlap.min_duration_minutes", "must be positive"));
        }

        let tod = &self.scoring.time_of_day;
        if tod.business_start_hour > 23 || tod.business_end_hour > 23 {
            return Err(invalid("scoring.time_of_day", "business hours must be within 0-23"));
        }
        if tod.business_start_hour > tod.business_end_hour {
            return Err(invalid(
                "scoring.time_of_day",
                "business_start_hour must not be after business_end_hour",
            ));
        }
        if let Some(hour) = tod.prime_hours.iter().find(|h| **h > 23) {
            return Err(invalid("scoring.time_of_day.prime_hours", format!("hour {hour} is out of range")));
        }

        let weights = [
            ("scoring.time_of_day.prime_bonus", tod.prime_bonus),
            ("scoring.time_of_day.business_bonus", tod.business_bonus),
            ("scoring.time_of_day.off_hours_bonus", tod.off_hours_bonus),
            ("scoring.weekday.workday_bonus", self.scoring.weekday.workday_bonus),
            ("scoring.weekday.midweek_bonus", self.scoring.weekday.midweek_bonus),
            ("scoring.priority.high", self.scoring.priority.high),
            ("scoring.priority.medium", self.scoring.priority.medium),
            ("scoring.priority.low", self.scoring.priority.low),
            ("scoring.priority.fallback", self.scoring.priority.fallback),
            ("scoring.history.hour_match_bonus", self.scoring.history.hour_match_bonus),
            ("scoring.history.weekday_match_bonus", self.scoring.history.weekday_match_bonus),
            ("scoring.history.success_bonus", self.scoring.history.success_bonus),
            ("scoring.history.max_bonus", self.scoring.history.max_bonus),
        ];
        for (key, value) in weights {
            non_negative(key, value)?;
        }

        let blend = self.scoring.blend;
        for (key, value) in [
            ("scoring.blend.rule_weight", blend.rule_weight),
            ("scoring.blend.model_weight", blend.model_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, format!("must be within [0, 1], got {value}")));
            }
        }

        if self.model.min_training_records == 0 {
            return Err(invalid("model.min_training_records", "must be at least 1"));
        }
        if self.model.n_estimators == 0 {
            return Err(invalid("model.n_estimators", "must be at least 1"));
        }
        if self.model.max_depth == 0 {
            return Err(invalid("model.max_depth", "must be at least 1"));
        }
        if self.model.min_samples_split < 2 {
            return Err(invalid("model.min_samples_split", "must be at least 2"));
        }

        Ok(())
    }
}
