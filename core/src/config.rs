//! Pager and submission configuration.
//!
//! Both structs deserialize from JSON with every field optional, but a
//! config is only usable after `validate()`: the payload budget has no
//! default and omitting it is an error, never "unlimited".

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compression::MAX_LEVEL_DEFLATE;
use crate::constants::{DEFAULT_DEFLATE_LEVEL, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS};
use crate::framing::FrameLayout;
use crate::page::PageOptions;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_payload_bytes is required and must be non-zero")]
    MissingBudget,

    #[error("invalid deflate level {0} (expected 0..={max})", max = MAX_LEVEL_DEFLATE)]
    InvalidLevel(u32),

    #[error("max_attempts must be at least 1")]
    InvalidAttempts,

    #[error("config parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Ceiling on a page's compressed byte length. Platform-imposed
    /// (calldata / gas), always supplied by the caller.
    pub max_payload_bytes: Option<usize>,

    /// Frame layout the registry expects.
    pub layout: FrameLayout,

    /// Raw deflate level, 0..=9.
    pub level: u32,

    /// Re-decode the finished plan before handing it out.
    pub verify: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: None,
            layout: FrameLayout::default(),
            level: DEFAULT_DEFLATE_LEVEL,
            verify: true,
        }
    }
}

impl PagerConfig {
    pub fn new(max_payload_bytes: usize) -> Self {
        Self { max_payload_bytes: Some(max_payload_bytes), ..Self::default() }
    }

    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// The explicit budget, or `MissingBudget`.
    pub fn budget(&self) -> Result<usize, ConfigError> {
        match self.max_payload_bytes {
            Some(b) if b > 0 => Ok(b),
            _ => Err(ConfigError::MissingBudget),
        }
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions { layout: self.layout, level: self.level }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.budget()?;
        if self.level > MAX_LEVEL_DEFLATE {
            return Err(ConfigError::InvalidLevel(self.level));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Attempts per page, counting the first one. Also bounds index count
    /// reads.
    pub max_attempts: u32,

    /// Registry index the plan's first record must land on. `None` means
    /// read it from the registry when submission starts.
    pub base_index: Option<u64>,

    /// Pause before re-reading the index count after a failed read,
    /// multiplied by the attempt number.
    pub retry_backoff_ms: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_index: None,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl SubmitConfig {
    pub fn new(max_attempts: u32, base_index: Option<u64>) -> Self {
        Self { max_attempts, base_index, ..Self::default() }
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff_ms = backoff.as_millis() as u64;
        self
    }

    /// Delay before read attempt `attempt + 1`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(attempt as u64))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidAttempts);
        }
        Ok(())
    }
}
