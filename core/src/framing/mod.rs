//! Frame encoding for asset record collections.
//!
//! Responsibilities:
//! - Define the frame layouts and their error taxonomy
//! - Encode an ordered record sequence into a canonical byte layout
//! - Decode frames with strict bounds checks
//!
//! Non-responsibilities:
//! - Compression
//! - Page metadata
//! - Budgets

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{AssetRecord, FrameError, FrameLayout};
pub use encode::{encode_frame, encoded_len};
pub use decode::{decode_frame, decode_frame_view, peek_item_count};
