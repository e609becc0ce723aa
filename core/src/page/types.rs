use serde::{Deserialize, Serialize};

use crate::compression::CompressionError;
use crate::constants::DEFAULT_DEFLATE_LEVEL;
use crate::framing::{FrameError, FrameLayout};
use crate::utils::{compute_checksum, hex_bytes};

/// Knobs that change the bytes of a page. Part of the plan so the
/// decoder side uses the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    pub layout: FrameLayout,
    pub level: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self { layout: FrameLayout::default(), level: DEFAULT_DEFLATE_LEVEL }
    }
}

/// The unit handed to the registry in one append call.
///
/// Invariant: `inflate(compressed).len() == original_length`, and the
/// inflated frame parses into exactly `item_count` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(with = "hex_bytes")]
    pub compressed: Vec<u8>,
    pub original_length: usize,
    pub item_count: usize,
}

impl Page {
    /// Bytes that count against the payload budget.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.compressed.len()
    }

    /// CRC32 of the compressed bytes, for journal lines and logs.
    pub fn checksum(&self) -> u32 {
        compute_checksum(&self.compressed)
    }

    /// `0x`-prefixed hex of the compressed bytes, the form contract
    /// tooling passes as `bytes` calldata.
    pub fn compressed_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.compressed))
    }

    pub fn summary(&self) -> String {
        format!(
            "Page(items: {}, frame: {} B, compressed: {} B, crc32: {:08x})",
            self.item_count,
            self.original_length,
            self.compressed.len(),
            self.checksum()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Compression(#[from] CompressionError),
}
