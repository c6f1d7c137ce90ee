//! Availability windows.
//!
//! A [`TimeWindow`] is a contiguous interval during which one party has
//! declared itself available. Timestamps are wall-clock readings in the
//! business reference time zone, so they are kept as [`NaiveDateTime`].

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Layouts accepted in addition to chrono's own ISO-8601 parser, which only
/// takes a `T` separator and requires seconds.
const EXTRA_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse an ISO-8601 timestamp into a wall-clock reading.
///
/// Accepts `2025-03-17T09:00:00`, `2025-03-17T09:00`, `2025-03-17 09:00:00`,
/// fractional seconds, a bare date (midnight), and RFC 3339 strings with an
/// offset. An offset is dropped after converting to the local reading it
/// describes, e.g. `2025-03-17T09:00:00+02:00` becomes 09:00.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = trimmed.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    for format in EXTRA_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    match trimmed.parse::<NaiveDate>() {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ValidationError::InvalidTimestamp {
                value: value.to_string(),
                message: "date has no midnight".to_string(),
            }),
        Err(err) => Err(ValidationError::InvalidTimestamp {
            value: value.to_string(),
            message: err.to_string(),
        }),
    }
}

/// A declared availability interval for one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub owner_id: String,
}

impl TimeWindow {
    /// Create a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeRange`] if `start >= end`.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        owner_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            start,
            end,
            owner_id: owner_id.into(),
        })
    }

    /// Create a window without checking `start < end`.
    ///
    /// Upstream extraction is noisy; the overlap finder tolerates windows
    /// built this way and skips the malformed ones.
    pub fn new_unchecked(
        start: NaiveDateTime,
        end: NaiveDateTime,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            owner_id: owner_id.into(),
        }
    }

    /// Parse both bounds from ISO-8601 strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either timestamp is malformed or the range is inverted.
    pub fn from_iso(start: &str, end: &str, owner_id: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?, owner_id)
    }

    /// Whether `start < end` holds.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// Availability entry as delivered by an availability source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWindow {
    pub start: String,
    pub end: String,
    pub owner_id: String,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ValidationError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        TimeWindow::from_iso(&raw.start, &raw.end, raw.owner_id)
    }
}

impl TryFrom<&RawWindow> for TimeWindow {
    type Error = ValidationError;

    fn try_from(raw: &RawWindow) -> Result<Self, Self::Error> {
        TimeWindow::from_iso(&raw.start, &raw.end, raw.owner_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_common_iso_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2025-03-17T09:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-17T09:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-17 09:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-17 09:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-03-17 09:00:00.250").unwrap(), expected + Duration::milliseconds(250));
        assert_eq!(parse_timestamp(" 2025-03-17T09:00:00.000 ").unwrap(), expected);
    }

    #[test]
    fn offset_keeps_local_wall_clock() {
        let dt = parse_timestamp("2025-03-17T09:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn bare_date_is_midnight() {
        let dt = parse_timestamp("2025-03-17").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn new_rejects_inverted_and_empty_ranges() {
        let start = parse_timestamp("2025-03-17T12:00").unwrap();
        let end = parse_timestamp("2025-03-17T09:00").unwrap();
        assert!(TimeWindow::new(start, end, "C001").is_err());
        assert!(TimeWindow::new(start, start, "C001").is_err());
        assert!(!TimeWindow::new_unchecked(start, end, "C001").is_valid());
    }

    #[test]
    fn raw_window_converts() {
        let raw = RawWindow {
            start: "2025-03-17T09:00:00".into(),
            end: "2025-03-17T12:00:00".into(),
            owner_id: "C001".into(),
        };
        let window = TimeWindow::try_from(&raw).unwrap();
        assert_eq!(window.duration_minutes(), 180);
        assert_eq!(window.owner_id, "C001");
    }
}
