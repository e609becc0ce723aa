use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// One trait image's pre-encoded pixel-run payload. Opaque to the codec.
pub type AssetRecord = Vec<u8>;

/// Wire layout of an uncompressed frame.
///
/// The id is stable; it is what a config file or journal names.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameLayout {
    /// `u32` LE count, then `u32` LE length + bytes per record.
    #[default]
    Packed = 0x01,
    /// Solidity ABI encoding of one `bytes[]` argument (32-byte BE words).
    AbiBytesArray = 0x02,
}

impl FrameLayout {
    pub fn name(self) -> &'static str {
        match self {
            FrameLayout::Packed => "packed",
            FrameLayout::AbiBytesArray => "abi_bytes_array",
        }
    }
}

/// Structural violation found while encoding or parsing a frame.
///
/// Every variant is a `MalformedFrame` condition: fatal for the buffer,
/// never retried with the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("malformed frame: truncated at offset {offset}, need {need} more bytes")]
    Truncated { offset: usize, need: usize },

    #[error("malformed frame: declared {declared} items, recovered {recovered}")]
    CountMismatch { declared: u64, recovered: u64 },

    #[error("malformed frame: item {index} declares {declared} bytes, only {available} available")]
    LengthOverrun { index: usize, declared: u64, available: usize },

    #[error("malformed frame: {extra} trailing bytes after last item")]
    TrailingBytes { extra: usize },

    #[error("malformed frame: record {index} is {len} bytes, exceeds field width")]
    RecordTooLong { index: usize, len: usize },

    #[error("malformed frame: non-canonical encoding: {0}")]
    NonCanonical(String),
}
