//! compression/types.rs
//! Codec traits and the compression error taxonomy.

use num_enum::TryFromPrimitive;

use crate::compression::constants::codec_ids;

#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum CompressionCodec {
    DeflateRaw = codec_ids::DEFLATE_RAW,
}

impl CompressionCodec {
    pub const fn name(self) -> &'static str {
        match self {
            CompressionCodec::DeflateRaw => "deflate-raw",
        }
    }
}

/// Compression and decompression failures.
///
/// Every decode-side variant is a `CorruptPayload` condition: the bytes
/// cannot be trusted and must not be retried as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompressionError {
    #[error("invalid deflate level {0} (expected 0..=9)")]
    InvalidLevel(u32),

    #[error("frame too large: {have} > {max}")]
    FrameTooLarge { have: usize, max: usize },

    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: &'static str, msg: String },

    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    #[error("corrupt payload: stream truncated after {produced} bytes")]
    Truncated { produced: usize },

    #[error("corrupt payload: {trailing} bytes after end of stream")]
    TrailingBytes { trailing: usize },

    #[error("corrupt payload: inflated {actual} bytes, page declares {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl CompressionError {
    /// True for failures that mean the compressed bytes themselves are bad.
    pub fn is_corrupt_payload(&self) -> bool {
        matches!(
            self,
            CompressionError::CorruptPayload(_)
                | CompressionError::Truncated { .. }
                | CompressionError::TrailingBytes { .. }
                | CompressionError::LengthMismatch { .. }
        )
    }
}

// Require Send so codecs can be handed to another thread with their plan.
pub trait Compressor: Send {
    /// Compress one complete frame into `out`.
    fn compress_frame(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError>;
}

pub trait Decompressor: Send {
    /// Inflate one complete stream into `out`; the result must be exactly
    /// `expected_len` bytes.
    fn decompress_frame(&mut self, input: &[u8], expected_len: usize, out: &mut Vec<u8>) -> Result<(), CompressionError>;
}
