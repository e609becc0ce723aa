//! Process-wide submission locks, one per `(target, category)`.
//!
//! Two plans for the same collection in flight at once would interleave
//! appends and break index contiguity, so the second one is refused
//! instead of queued.

use std::collections::HashSet;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::registry::SubmissionError;

fn in_flight() -> &'static Mutex<HashSet<String>> {
    static IN_FLIGHT: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    IN_FLIGHT.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Held for the duration of one plan submission; released on drop.
#[derive(Debug)]
pub struct SubmissionGuard {
    key: String,
}

impl SubmissionGuard {
    pub fn acquire(target: &str, category: &str) -> Result<Self, SubmissionError> {
        let key = format!("{}/{}", target, category);
        if !in_flight().lock().insert(key.clone()) {
            return Err(SubmissionError::PlanInFlight { category: category.to_string() });
        }
        Ok(Self { key })
    }

    pub fn is_held(target: &str, category: &str) -> bool {
        in_flight().lock().contains(&format!("{}/{}", target, category))
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        in_flight().lock().remove(&self.key);
    }
}
