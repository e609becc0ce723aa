//! Reference implementation of the registry's decode path.
//!
//! The registry inflates `compressed`, checks it against
//! `original_length`, parses the frame and expects `item_count` records.
//! Anything it would reject, this rejects.

use crate::compression::decompress;
use crate::framing::{decode_frame, AssetRecord, FrameError, FrameLayout};
use crate::page::types::{Page, PageError};

pub fn decode_page(page: &Page, layout: FrameLayout) -> Result<Vec<AssetRecord>, PageError> {
    let frame = decompress(&page.compressed, page.original_length)?;
    let records = decode_frame(&frame, layout)?;

    if records.len() != page.item_count {
        return Err(PageError::Frame(FrameError::CountMismatch {
            declared: page.item_count as u64,
            recovered: records.len() as u64,
        }));
    }
    Ok(records)
}
