/// Stable codec IDs (u16) for snapshots and the submission journal.
pub mod codec_ids {
    pub const DEFLATE_RAW: u16 = 0x0003;
}

/// Highest deflate level flate2 accepts.
pub const MAX_LEVEL_DEFLATE: u32 = 9;

/// Max frame size sanity bound (32 MiB). Pages are orders of magnitude
/// smaller; anything above this is a corrupt `original_length`.
pub const MAX_FRAME_SIZE: usize = 32 * 1024 * 1024;
