//! Feature encoding for the success model.
//!
//! Rows are laid out as `[weekday, hour, interviewer one-hot..., level one-hot...]`
//! with each one-hot group in sorted category order.

use std::collections::BTreeSet;

use crate::predictor::SlotFeatures;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEncoder {
    interviewers: Vec<String>,
    levels: Vec<String>,
}

impl CategoryEncoder {
    /// Learn the categories from `(interviewer_id, candidate_level)` pairs.
    pub fn fit<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut interviewers = BTreeSet::new();
        let mut levels = BTreeSet::new();
        for (interviewer, level) in pairs {
            interviewers.insert(interviewer.to_string());
            levels.insert(level.to_string());
        }
        Self {
            interviewers: interviewers.into_iter().collect(),
            levels: levels.into_iter().collect(),
        }
    }

    /// Number of columns in an encoded row.
    pub fn width(&self) -> usize {
        2 + self.interviewers.len() + self.levels.len()
    }

    pub fn interviewers(&self) -> &[String] {
        &self.interviewers
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Encode one slot. Categories unseen at fit time leave their group all zero.
    pub fn encode(&self, features: &SlotFeatures<'_>) -> Vec<f64> {
        let mut row = vec![0.0; self.width()];
        row[0] = f64::from(features.weekday);
        row[1] = f64::from(features.hour);

        let offset = 2;
        if let Ok(i) = self
            .interviewers
            .binary_search_by(|c| c.as_str().cmp(features.interviewer_id))
        {
            row[offset + i] = 1.0;
        }

        let offset = offset + self.interviewers.len();
        if let Ok(i) = self
            .levels
            .binary_search_by(|c| c.as_str().cmp(features.candidate_level))
        {
            row[offset + i] = 1.0;
        }

        row
    }

    /// Human-readable column names, in row order.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["day_of_week".to_string(), "hour_of_day".to_string()];
        names.extend(self.interviewers.iter().map(|c| format!("interviewer_id_{c}")));
        names.extend(self.levels.iter().map(|c| format!("candidate_level_{c}")));
        names
    }
}
