//! Public entry point: find and rank meeting slots for two parties.
//!
//! [`SlotMatcher`] owns the current success model as a shared, immutable
//! snapshot. Scoring clones the snapshot handle and never mutates it;
//! training builds a new snapshot and swaps it in under a short write lock.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::MatcherConfig;
use crate::history::HistoricalOutcome;
use crate::model::{ModelTrainer, TrainingRecord};
use crate::overlap::OverlapFinder;
use crate::predictor::{NoModel, SuccessPredictor};
use crate::profile::RequesterProfile;
use crate::scorer::{ScoredSlot, SlotScorer};
use crate::window::TimeWindow;

/// Shared handle to the predictor in effect.
pub type ModelSnapshot = Arc<dyn SuccessPredictor>;

#[derive(Debug)]
pub struct SlotMatcher {
    finder: OverlapFinder,
    scorer: SlotScorer,
    trainer: ModelTrainer,
    model: RwLock<ModelSnapshot>,
}

impl Default for SlotMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotMatcher {
    /// Create a matcher with default configuration and no model.
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        let untrained: ModelSnapshot = Arc::new(NoModel);
        Self {
            finder: OverlapFinder::from_config(&config.overlap),
            scorer: SlotScorer::with_config(config.scoring),
            trainer: ModelTrainer::with_config(config.model),
            model: RwLock::new(untrained),
        }
    }

    /// Current predictor snapshot.
    pub fn model_snapshot(&self) -> ModelSnapshot {
        let guard = self.model.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn is_trained(&self) -> bool {
        self.model_snapshot().is_trained()
    }

    /// Fit a new success model and make it current.
    ///
    /// Returns `false` and keeps the previous model when there are too few
    /// records.
    pub fn train_model(&self, records: &[TrainingRecord]) -> bool {
        match self.trainer.train(records) {
            Ok(model) => {
                let snapshot: ModelSnapshot = Arc::new(model);
                *self.model.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
                tracing::info!(records = records.len(), "success model trained");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "success model training refused");
                false
            }
        }
    }

    /// Rank every overlap of the two parties' windows, best first.
    ///
    /// Returns an empty vector when nothing overlaps for long enough.
    pub fn find_optimal_slots(
        &self,
        candidate_windows: &[TimeWindow],
        interviewer_windows: &[TimeWindow],
        profile: &RequesterProfile,
        history: Option<&[HistoricalOutcome]>,
    ) -> Vec<ScoredSlot> {
        let snapshot = self.model_snapshot();
        self.find_optimal_slots_with(
            candidate_windows,
            interviewer_windows,
            profile,
            history,
            snapshot.as_ref(),
        )
    }

    /// Same as [`find_optimal_slots`](Self::find_optimal_slots) with an
    /// explicit predictor instead of the current snapshot.
    pub fn find_optimal_slots_with(
        &self,
        candidate_windows: &[TimeWindow],
        interviewer_windows: &[TimeWindow],
        profile: &RequesterProfile,
        history: Option<&[HistoricalOutcome]>,
        predictor: &dyn SuccessPredictor,
    ) -> Vec<ScoredSlot> {
        let overlaps = self.finder.find(candidate_windows, interviewer_windows);
        if overlaps.is_empty() {
            tracing::debug!("no overlapping availability");
            return Vec::new();
        }

        let scored = self.scorer.score_all(&overlaps, profile, history, predictor);
        tracing::debug!(
            slots = scored.len(),
            best = scored.first().map(|s| s.score),
            model = predictor.is_trained(),
            "slots scored"
        );
        scored
    }
}
