use crate::config::ConfigError;

/// Failures talking to, or reasoning about, the registry collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The registry definitely refused the call (decode validation failed,
    /// collection full). Resending the same page cannot succeed.
    #[error("registry rejected {category} page: {reason}")]
    Rejected { category: String, reason: String },

    /// The call may or may not have been applied (timeout, lost receipt).
    /// Resolve by querying the index count, never by blind resubmission.
    #[error("ambiguous result appending to {category}: {reason}")]
    Ambiguous { category: String, reason: String },

    /// A read-only query failed; safe to retry.
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    #[error("{category} index count is {found}, plan expected {expected}")]
    IndexDivergence { category: String, expected: u64, found: u64 },

    #[error("{category} acknowledged {got:?}, plan expected {expected:?}")]
    UnexpectedAck { category: String, expected: (u64, u64), got: (u64, u64) },

    #[error("a plan for {category} is already being submitted")]
    PlanInFlight { category: String },

    #[error("{category} page {page} failed after {attempts} attempts: {last}")]
    AttemptsExhausted { category: String, page: usize, attempts: u32, last: Box<SubmissionError> },

    #[error("submission journal: {0}")]
    Journal(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SubmissionError {
    /// True when retrying, after re-reading registry state, may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmissionError::Ambiguous { .. } | SubmissionError::Unavailable(_))
    }
}

impl From<std::io::Error> for SubmissionError {
    fn from(e: std::io::Error) -> Self {
        SubmissionError::Journal(e.to_string())
    }
}
