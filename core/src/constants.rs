/// Width of the `Packed` layout's count and length fields (u32, LE).
pub const PACKED_LEN_FIELD: usize = 4;

/// Solidity ABI word size. Every integer in an `AbiBytesArray` frame
/// occupies one big-endian word.
pub const ABI_WORD: usize = 32;

/// Offset of the `bytes[]` body inside a single-argument ABI encoding.
pub const ABI_HEAD_OFFSET: u64 = 0x20;

/// Largest record length either layout can carry.
pub const MAX_RECORD_LEN: usize = u32::MAX as usize;

/// Raw deflate level used when the config does not name one.
/// Best compression: bytes on chain cost more than CPU here.
pub const DEFAULT_DEFLATE_LEVEL: u32 = 9;

/// Attempts per page before a submission failure is surfaced.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base pause between index count reads after a failed read (ms).
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 25;

/// Default cap on records per category for the in-memory registry.
pub const DEFAULT_MAX_COLLECTION_SIZE: u64 = 65_536;

/// Palette prefix: index 0 is the transparent color.
pub const PALETTE_TRANSPARENT: [u8; 3] = [0x00, 0x00, 0x00];

/// Record tag for acknowledged pages in the submission journal.
pub const JOURNAL_PAGE_TAG: &str = "PAGE";
