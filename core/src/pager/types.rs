use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::page::{Page, PageError, PageOptions};
use crate::telemetry::{PagerCounters, PlanSnapshot};

/// A page together with the slice of the collection it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPage {
    pub page: Page,
    /// First record (inclusive), position in the collection.
    pub start: usize,
    /// Last record (exclusive).
    pub end: usize,
}

impl PlannedPage {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Registry index range once the plan is applied at `base`.
    pub fn index_range(&self, base: u64) -> (u64, u64) {
        (base + self.start as u64, base + self.end as u64)
    }
}

/// Ordered, budget-respecting pages for one collection.
///
/// Pages must be submitted strictly in order and none skipped; the
/// registry's index counter depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPlan {
    pub category: String,
    pub options: PageOptions,
    pub budget: usize,
    pub pages: Vec<PlannedPage>,
    pub counters: PagerCounters,
    pub elapsed: Duration,
}

impl SubmissionPlan {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Sum of `item_count` over pages.
    pub fn total_items(&self) -> usize {
        self.pages.iter().map(|p| p.page.item_count).sum()
    }

    pub fn largest_page(&self) -> usize {
        self.pages.iter().map(|p| p.page.payload_len()).max().unwrap_or(0)
    }

    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot::from(&self.category, self.budget, &self.counters, self.largest_page(), self.elapsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("record {index} alone compresses to {page_bytes} bytes, budget is {budget}")]
    RecordTooLarge { index: usize, page_bytes: usize, budget: usize },

    #[error("empty page is {page_bytes} bytes, budget is {budget}")]
    BudgetBelowEmptyPage { page_bytes: usize, budget: usize },

    #[error("plan inconsistent at page {page}: {reason}")]
    Inconsistent { page: usize, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Page(#[from] PageError),
}
