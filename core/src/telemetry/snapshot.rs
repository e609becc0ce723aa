//! telemetry/snapshot.rs
//!
//! Immutable summary of a finished plan, serializable for reports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::PagerCounters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub category: String,
    pub budget: usize,
    pub pages: u64,
    pub records: u64,
    pub bytes_frame: u64,
    pub bytes_compressed: u64,
    pub trial_builds: u64,
    /// `bytes_compressed / bytes_frame`, 0.0 for an empty frame set.
    pub compression_ratio: f64,
    /// Fullest page as a fraction of the budget.
    pub peak_budget_use: f64,
    pub elapsed: Duration,
}

impl PlanSnapshot {
    pub fn from(
        category: &str,
        budget: usize,
        counters: &PagerCounters,
        largest_page: usize,
        elapsed: Duration,
    ) -> Self {
        let compression_ratio = if counters.bytes_frame > 0 {
            counters.bytes_compressed as f64 / counters.bytes_frame as f64
        } else {
            0.0
        };
        let peak_budget_use = if budget > 0 {
            largest_page as f64 / budget as f64
        } else {
            0.0
        };

        Self {
            category: category.to_string(),
            budget,
            pages: counters.pages,
            records: counters.records,
            bytes_frame: counters.bytes_frame,
            bytes_compressed: counters.bytes_compressed,
            trial_builds: counters.trial_builds,
            compression_ratio,
            peak_budget_use,
            elapsed,
        }
    }

    /// Internal consistency: no page over budget, counts coherent.
    pub fn sanity_check(&self) -> bool {
        self.peak_budget_use <= 1.0
            && self.trial_builds >= self.pages
            && (self.records == 0 || self.pages > 0)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
