//! telemetry/counters.rs
//! Mutable counters collected while a plan is built.
//!
//! Converted into an immutable `PlanSnapshot` once the plan is final.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerCounters {
    /// Pages emitted into the plan.
    pub pages: u64,
    /// Records covered by emitted pages.
    pub records: u64,
    /// Uncompressed frame bytes across emitted pages.
    pub bytes_frame: u64,
    /// Compressed bytes across emitted pages (what goes on chain).
    pub bytes_compressed: u64,
    /// Tentative page builds, accepted or not.
    pub trial_builds: u64,
    /// Trial builds rejected for exceeding the budget.
    pub rejected_builds: u64,
}

impl PagerCounters {
    /// Record one tentative build and whether it fit the budget.
    pub fn add_trial(&mut self, fit: bool) {
        self.trial_builds += 1;
        if !fit {
            self.rejected_builds += 1;
        }
    }

    /// Record one page accepted into the plan.
    pub fn add_page(&mut self, item_count: usize, frame_len: usize, compressed_len: usize) {
        self.pages += 1;
        self.records += item_count as u64;
        self.bytes_frame += frame_len as u64;
        self.bytes_compressed += compressed_len as u64;
    }

    pub fn merge(&mut self, other: &PagerCounters) {
        *self += other.clone();
    }
}

impl AddAssign for PagerCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.pages           += rhs.pages;
        self.records         += rhs.records;
        self.bytes_frame     += rhs.bytes_frame;
        self.bytes_compressed += rhs.bytes_compressed;
        self.trial_builds    += rhs.trial_builds;
        self.rejected_builds += rhs.rejected_builds;
    }
}
