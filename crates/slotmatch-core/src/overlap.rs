//! Overlap detection between candidate and interviewer availability.
//!
//! Every candidate window is intersected with every interviewer window.
//! Both sides hold days of availability, not years, so the pairwise scan
//! is cheap.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::OverlapConfig;
use crate::window::TimeWindow;

/// Intersection of one candidate window and one interviewer window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Whole minutes, rounded down (90m30s reads 90). Use
    /// [`duration`](Self::duration) for the exact length.
    pub duration_minutes: i64,
    pub candidate_id: String,
    pub interviewer_id: String,
}

impl OverlapSlot {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check if this slot can fit a meeting of given length
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration() >= Duration::minutes(minutes)
    }
}

/// Finds pairwise overlaps that are long enough to hold a meeting.
#[derive(Debug, Clone)]
pub struct OverlapFinder {
    min_duration_minutes: i64,
}

impl Default for OverlapFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlapFinder {
    /// Create a finder with the default 30 minute threshold
    pub fn new() -> Self {
        Self {
            min_duration_minutes: OverlapConfig::default().min_duration_minutes,
        }
    }

    pub fn from_config(config: &OverlapConfig) -> Self {
        Self {
            min_duration_minutes: config.min_duration_minutes,
        }
    }

    /// Set the minimum overlap duration
    pub fn with_min_duration(mut self, minutes: i64) -> Self {
        self.min_duration_minutes = minutes;
        self
    }

    pub fn min_duration_minutes(&self) -> i64 {
        self.min_duration_minutes
    }

    /// Intersect every candidate window with every interviewer window.
    ///
    /// Slots come out candidate-major, in input order. Malformed windows
    /// (`start >= end`) on either side contribute nothing.
    pub fn find(&self, candidates: &[TimeWindow], interviewers: &[TimeWindow]) -> Vec<OverlapSlot> {
        let min_duration = Duration::minutes(self.min_duration_minutes);
        let mut slots = Vec::new();

        for candidate in candidates {
            if !candidate.is_valid() {
                tracing::debug!(
                    owner = %candidate.owner_id,
                    start = %candidate.start,
                    end = %candidate.end,
                    "skipping malformed candidate window"
                );
                continue;
            }

            for interviewer in interviewers {
                if !interviewer.is_valid() {
                    tracing::debug!(
                        owner = %interviewer.owner_id,
                        start = %interviewer.start,
                        end = %interviewer.end,
                        "skipping malformed interviewer window"
                    );
                    continue;
                }

                let start = candidate.start.max(interviewer.start);
                let end = candidate.end.min(interviewer.end);
                if start >= end {
                    continue;
                }

                let duration = end - start;
                if duration < min_duration {
                    continue;
                }

                slots.push(OverlapSlot {
                    start,
                    end,
                    duration_minutes: duration.num_minutes(),
                    candidate_id: candidate.owner_id.clone(),
                    interviewer_id: interviewer.owner_id.clone(),
                });
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            interviewers = interviewers.len(),
            slots = slots.len(),
            "overlap scan finished"
        );
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str, owner: &str) -> TimeWindow {
        TimeWindow::from_iso(start, end, owner).unwrap()
    }

    #[test]
    fn finds_simple_overlap() {
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[window("2025-03-17T09:00", "2025-03-17T12:00", "C001")],
            &[window("2025-03-17T10:00", "2025-03-17T15:00", "R001")],
        );

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].duration_minutes, 120);
        assert_eq!(slots[0].start.to_string(), "2025-03-17 10:00:00");
        assert_eq!(slots[0].end.to_string(), "2025-03-17 12:00:00");
        assert_eq!(slots[0].candidate_id, "C001");
        assert_eq!(slots[0].interviewer_id, "R001");
    }

    #[test]
    fn exact_threshold_is_kept() {
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[window("2025-03-17T09:00", "2025-03-17T10:00", "C001")],
            &[window("2025-03-17T09:30", "2025-03-17T11:00", "R001")],
        );
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].duration_minutes, 30);
    }

    #[test]
    fn short_overlap_is_dropped() {
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[window("2025-03-17T09:00", "2025-03-17T10:00", "C001")],
            &[window("2025-03-17T09:31", "2025-03-17T11:00", "R001")],
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn duration_minutes_rounds_down() {
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[window("2025-03-17T09:00:00", "2025-03-17T10:30:30", "C001")],
            &[window("2025-03-17T09:00:00", "2025-03-17T11:00:00", "R001")],
        );
        assert_eq!(slots[0].duration_minutes, 90);
        assert_eq!(slots[0].duration(), Duration::seconds(90 * 60 + 30));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let finder = OverlapFinder::new().with_min_duration(0);
        let slots = finder.find(
            &[window("2025-03-17T09:00", "2025-03-17T10:00", "C001")],
            &[window("2025-03-17T10:00", "2025-03-17T11:00", "R001")],
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn malformed_windows_are_skipped_not_fatal() {
        let start = crate::window::parse_timestamp("2025-03-17T12:00").unwrap();
        let end = crate::window::parse_timestamp("2025-03-17T09:00").unwrap();
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[
                TimeWindow::new_unchecked(start, end, "C001"),
                TimeWindow::new_unchecked(start, start, "C001"),
                window("2025-03-18T14:00", "2025-03-18T17:00", "C001"),
            ],
            &[window("2025-03-18T09:00", "2025-03-18T16:00", "R001")],
        );
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].duration_minutes, 120);
    }

    #[test]
    fn emission_order_is_candidate_major() {
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[
                window("2025-03-17T09:00", "2025-03-17T12:00", "C001"),
                window("2025-03-18T09:00", "2025-03-18T12:00", "C001"),
            ],
            &[
                window("2025-03-18T09:00", "2025-03-18T10:00", "R001"),
                window("2025-03-17T09:00", "2025-03-17T10:00", "R002"),
            ],
        );
        let ids: Vec<_> = slots.iter().map(|s| s.interviewer_id.as_str()).collect();
        assert_eq!(ids, vec!["R002", "R001"]);
    }

    #[test]
    fn can_fit_checks_duration() {
        let finder = OverlapFinder::new();
        let slots = finder.find(
            &[window("2025-03-17T09:00", "2025-03-17T10:00", "C001")],
            &[window("2025-03-17T09:00", "2025-03-17T10:00", "R001")],
        );
        assert!(slots[0].can_fit(60));
        assert!(!slots[0].can_fit(61));
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        let finder = OverlapFinder::new();
        assert!(finder.find(&[], &[]).is_empty());
    }
}
