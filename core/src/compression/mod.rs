//! compression/mod.rs
//! Raw deflate adaptor for page payloads.
//!
//! Notes:
//! - Output is not required to be byte-identical across implementations,
//!   only exactly invertible.
//! - `decompress` validates against the length declared by the page, not
//!   against anything embedded in the stream.

pub mod constants;
pub mod types;
pub mod deflate;

pub use constants::*;
pub use types::*;
pub use deflate::{DeflateRawCompressor, DeflateRawDecompressor};

/// Compress one frame with raw deflate at `level`.
pub fn compress(input: &[u8], level: u32) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(input.len() / 2 + 64);
    DeflateRawCompressor::new(level)?.compress_frame(input, &mut out)?;
    Ok(out)
}

/// Inflate `input`, requiring exactly `original_length` bytes of output.
pub fn decompress(input: &[u8], original_length: usize) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::with_capacity(original_length);
    DeflateRawDecompressor::new().decompress_frame(input, original_length, &mut out)?;
    Ok(out)
}
