use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::constants::{ABI_HEAD_OFFSET, ABI_WORD, MAX_RECORD_LEN, PACKED_LEN_FIELD};
use crate::framing::types::{FrameError, FrameLayout};

/// Round `len` up to the next ABI word boundary.
#[inline]
pub(crate) fn abi_padded(len: usize) -> usize {
    len.div_ceil(ABI_WORD) * ABI_WORD
}

/// Exact encoded size of `records` under `layout`.
pub fn encoded_len<R: AsRef<[u8]>>(records: &[R], layout: FrameLayout) -> usize {
    match layout {
        FrameLayout::Packed => {
            PACKED_LEN_FIELD
                + records
                    .iter()
                    .map(|r| PACKED_LEN_FIELD + r.as_ref().len())
                    .sum::<usize>()
        }
        FrameLayout::AbiBytesArray => {
            // head offset + count + offset table + (len word + padded data) per item
            2 * ABI_WORD
                + records
                    .iter()
                    .map(|r| 2 * ABI_WORD + abi_padded(r.as_ref().len()))
                    .sum::<usize>()
        }
    }
}

/// Serialize an ordered record sequence into one frame.
///
/// Packed layout:
///
/// ```text
/// [ count (u32 LE) ]
/// [ len_0 (u32 LE) ][ bytes_0 ]
/// ...
/// [ len_n (u32 LE) ][ bytes_n ]
/// ```
///
/// ABI layout (`abi.encode(bytes[])`):
///
/// ```text
/// [ 0x20 ][ count ][ off_0 .. off_n ]
/// [ len_0 ][ bytes_0, zero padded to 32 ]
/// ...
/// ```
pub fn encode_frame<R: AsRef<[u8]>>(records: &[R], layout: FrameLayout) -> Result<Vec<u8>, FrameError> {
    if let Some((index, len)) = records
        .iter()
        .map(|r| r.as_ref().len())
        .enumerate()
        .find(|(_, len)| *len > MAX_RECORD_LEN)
    {
        return Err(FrameError::RecordTooLong { index, len });
    }
    if records.len() > MAX_RECORD_LEN {
        return Err(FrameError::CountMismatch {
            declared: records.len() as u64,
            recovered: MAX_RECORD_LEN as u64,
        });
    }

    let expected = encoded_len(records, layout);
    let out = match layout {
        FrameLayout::Packed => encode_packed(records, expected),
        FrameLayout::AbiBytesArray => encode_abi(records, expected),
    };

    if out.len() != expected {
        return Err(FrameError::NonCanonical(format!(
            "encoder wrote {} bytes, layout requires {}",
            out.len(),
            expected
        )));
    }
    Ok(out)
}

fn encode_packed<R: AsRef<[u8]>>(records: &[R], capacity: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(capacity);
    let mut field = [0u8; PACKED_LEN_FIELD];

    LittleEndian::write_u32(&mut field, records.len() as u32);
    out.extend_from_slice(&field);

    for record in records {
        let bytes = record.as_ref();
        LittleEndian::write_u32(&mut field, bytes.len() as u32);
        out.extend_from_slice(&field);
        out.extend_from_slice(bytes);
    }
    out
}

#[inline]
fn put_word(out: &mut Vec<u8>, v: u64) {
    let mut word = [0u8; ABI_WORD];
    BigEndian::write_u64(&mut word[ABI_WORD - 8..], v);
    out.extend_from_slice(&word);
}

fn encode_abi<R: AsRef<[u8]>>(records: &[R], capacity: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(capacity);

    put_word(&mut out, ABI_HEAD_OFFSET);
    put_word(&mut out, records.len() as u64);

    // Offsets are relative to the start of the offset table.
    let mut offset = records.len() * ABI_WORD;
    for record in records {
        put_word(&mut out, offset as u64);
        offset += ABI_WORD + abi_padded(record.as_ref().len());
    }

    for record in records {
        let bytes = record.as_ref();
        put_word(&mut out, bytes.len() as u64);
        out.extend_from_slice(bytes);
        out.resize(out.len() + abi_padded(bytes.len()) - bytes.len(), 0);
    }
    out
}
