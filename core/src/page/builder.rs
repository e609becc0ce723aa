use crate::compression::compress;
use crate::framing::encode_frame;
use crate::page::types::{Page, PageError, PageOptions};

/// Frame, compress and describe `records` as one page. Pure.
pub fn build_page<R: AsRef<[u8]>>(records: &[R], options: &PageOptions) -> Result<Page, PageError> {
    let frame = encode_frame(records, options.layout)?;
    let compressed = compress(&frame, options.level)?;

    Ok(Page {
        compressed,
        original_length: frame.len(),
        item_count: records.len(),
    })
}
