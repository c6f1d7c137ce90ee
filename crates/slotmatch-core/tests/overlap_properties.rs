//! Property tests for the overlap finder.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use slotmatch_core::{OverlapFinder, TimeWindow};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 17)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn window(offset_min: i64, length_min: i64, owner: &str) -> TimeWindow {
    let start = base() + Duration::minutes(offset_min);
    TimeWindow::new(start, start + Duration::minutes(length_min), owner).unwrap()
}

proptest! {
    #[test]
    fn prop_disjoint_windows_never_match(
        a_start in 0i64..2000,
        a_len in 1i64..600,
        gap in 0i64..600,
        b_len in 1i64..600,
    ) {
        let a = window(a_start, a_len, "C");
        let b = window(a_start + a_len + gap, b_len, "R");
        let finder = OverlapFinder::new();

        prop_assert!(finder.find(&[a.clone()], &[b.clone()]).is_empty());
        prop_assert!(finder.find(&[b], &[a]).is_empty());
    }

    #[test]
    fn prop_one_slot_iff_overlap_reaches_threshold(
        a_start in 0i64..1000,
        a_len in 1i64..600,
        b_start in 0i64..1000,
        b_len in 1i64..600,
    ) {
        let a = window(a_start, a_len, "C");
        let b = window(b_start, b_len, "R");
        let slots = OverlapFinder::new().find(&[a.clone()], &[b.clone()]);

        let overlap = (a_start + a_len).min(b_start + b_len) - a_start.max(b_start);
        if overlap >= 30 {
            prop_assert_eq!(slots.len(), 1);
            let slot = &slots[0];
            prop_assert_eq!(slot.duration_minutes, overlap);
            prop_assert_eq!(slot.start, a.start.max(b.start));
            prop_assert_eq!(slot.end, a.end.min(b.end));
            prop_assert!(slot.start >= a.start && slot.end <= a.end);
            prop_assert!(slot.start >= b.start && slot.end <= b.end);
        } else {
            prop_assert!(slots.is_empty());
        }
    }

    #[test]
    fn prop_slot_count_bounded_by_pairs(
        starts in prop::collection::vec((0i64..3000, 1i64..400), 0..8),
        others in prop::collection::vec((0i64..3000, 1i64..400), 0..8),
    ) {
        let candidates: Vec<_> = starts.iter().map(|(s, l)| window(*s, *l, "C")).collect();
        let interviewers: Vec<_> = others.iter().map(|(s, l)| window(*s, *l, "R")).collect();
        let slots = OverlapFinder::new().find(&candidates, &interviewers);

        prop_assert!(slots.len() <= candidates.len() * interviewers.len());
        for slot in &slots {
            prop_assert!(slot.duration_minutes >= 30);
            prop_assert!(slot.start < slot.end);
        }
    }
}
