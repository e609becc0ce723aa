//! Sequential, lock-guarded submission of plans to the registry.

pub mod lock;
pub mod submitter;

pub use lock::SubmissionGuard;
pub use submitter::{submit_plan, SubmissionReport};
