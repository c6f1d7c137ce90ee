//! # Slotmatch Core Library
//!
//! Finds the times at which a candidate and an interviewer are both free and
//! ranks them by how good a meeting slot they make.
//!
//! ## Architecture
//!
//! - **Overlap Finder**: pairwise intersection of both parties' availability
//!   windows, dropping overlaps shorter than the minimum meeting length
//! - **Slot Scorer**: time-of-day, weekday, requester priority and historical
//!   pattern signals folded into a single score
//! - **Success Model**: optional random forest trained on past interviews whose
//!   success probability is blended into the rule score
//!
//! The computation is synchronous and free of I/O. A [`SlotMatcher`] may be
//! shared across threads; its model snapshot is replaced atomically on
//! retraining.
//!
//! ## Key Components
//!
//! - [`SlotMatcher`]: entry point (`find_optimal_slots`, `train_model`)
//! - [`OverlapFinder`]: window intersection
//! - [`SlotScorer`]: rule-based scoring
//! - [`SuccessPredictor`]: capability implemented by [`NoModel`] and [`TrainedModel`]
//! - [`MatcherConfig`]: TOML configuration

pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod overlap;
pub mod predictor;
pub mod profile;
pub mod scorer;
pub mod window;

pub use config::{
    BlendWeights, HistoryConfig, MatcherConfig, ModelConfig, OverlapConfig, PriorityWeights,
    ScoringConfig, TimeOfDayConfig, WeekdayConfig,
};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use history::{historical_bonus, HistoricalOutcome};
pub use matcher::{ModelSnapshot, SlotMatcher};
pub use model::{ModelTrainer, TrainedModel, TrainingRecord};
pub use overlap::{OverlapFinder, OverlapSlot};
pub use predictor::{BlendOutcome, NoModel, SlotFeatures, SuccessPredictor};
pub use profile::{Priority, RequesterProfile};
pub use scorer::{ScoreBreakdown, ScoredSlot, SlotScorer};
pub use window::{parse_timestamp, RawWindow, TimeWindow};
