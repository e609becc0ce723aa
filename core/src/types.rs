use crate::{
    compression::CompressionError,
    config::ConfigError,
    framing::FrameError,
    input::InputError,
    page::PageError,
    pager::PlanError,
    registry::SubmissionError,
};

/// Unified error covering frame, compression, planning, submission,
/// configuration and input failures.
/// - `From<T>` impls enable `?` across layers.
/// - Frame, compression and plan errors abort the whole run: skipping a
///   page would break index contiguity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagerError {
    /// `MalformedFrame`.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// `CorruptPayload`.
    #[error("compression error: {0}")]
    Compression(#[from] CompressionError),

    /// `RecordTooLarge` and plan inconsistencies.
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// `SubmissionFailure`.
    #[error("submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),
}

impl From<PageError> for PagerError {
    fn from(e: PageError) -> Self {
        match e {
            PageError::Frame(e) => PagerError::Frame(e),
            PageError::Compression(e) => PagerError::Compression(e),
        }
    }
}
