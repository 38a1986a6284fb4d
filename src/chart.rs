//! Bar-chart payloads for the web UI.

use serde::Serialize;

use crate::loader::TripRecord;
use crate::stats::frequency_table;

/// Data for one bar chart, rendered client-side from embedded JSON.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl BarChart {
    pub fn from_counts(title: impl Into<String>, counts: &[(String, usize)]) -> Self {
        BarChart {
            title: title.into(),
            labels: counts.iter().map(|(label, _)| label.clone()).collect(),
            values: counts.iter().map(|(_, count)| *count).collect(),
        }
    }

    /// User-type distribution chart, the one aggregation the web layer
    /// consumes from the stats engine.
    pub fn user_types(title: impl Into<String>, trips: &[TripRecord]) -> Self {
        let counts = frequency_table(trips.iter().filter_map(|t| t.user_type.clone()));
        Self::from_counts(title, &counts)
    }
}
