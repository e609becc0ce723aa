//! Pager: splits a collection into an ordered, budget-respecting
//! sequence of pages and validates the result.

pub mod types;
pub mod plan;
pub mod verify;

pub use types::{PlanError, PlannedPage, SubmissionPlan};
pub use plan::{plan, plan_collection};
pub use verify::verify_plan;
