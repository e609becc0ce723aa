use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::constants::{ABI_HEAD_OFFSET, ABI_WORD, PACKED_LEN_FIELD};
use crate::framing::encode::abi_padded;
use crate::framing::types::{AssetRecord, FrameError, FrameLayout};

/// Parse a frame into borrowed record slices.
///
/// Caller guarantees:
/// - The full frame is provided (no streaming)
/// - Count checks against page metadata happen above this layer
pub fn decode_frame_view(wire: &[u8], layout: FrameLayout) -> Result<Vec<&[u8]>, FrameError> {
    match layout {
        FrameLayout::Packed => decode_packed(wire),
        FrameLayout::AbiBytesArray => decode_abi(wire),
    }
}

/// Parse a frame into owned records. Exact inverse of `encode_frame`.
pub fn decode_frame(wire: &[u8], layout: FrameLayout) -> Result<Vec<AssetRecord>, FrameError> {
    Ok(decode_frame_view(wire, layout)?
        .into_iter()
        .map(<[u8]>::to_vec)
        .collect())
}

/// Read only the declared item count.
pub fn peek_item_count(wire: &[u8], layout: FrameLayout) -> Result<u64, FrameError> {
    match layout {
        FrameLayout::Packed => Ok(read_u32(wire, 0)? as u64),
        FrameLayout::AbiBytesArray => {
            let head = read_word(wire, 0)?;
            if head != ABI_HEAD_OFFSET {
                return Err(FrameError::NonCanonical(format!("head offset {:#x}", head)));
            }
            read_word(wire, ABI_WORD)
        }
    }
}

#[inline]
fn read_u32(wire: &[u8], off: usize) -> Result<u32, FrameError> {
    let end = off + PACKED_LEN_FIELD;
    if end > wire.len() {
        return Err(FrameError::Truncated { offset: off, need: end - wire.len() });
    }
    Ok(LittleEndian::read_u32(&wire[off..end]))
}

/// One ABI word as u64; the high 24 bytes must be zero.
#[inline]
fn read_word(wire: &[u8], off: usize) -> Result<u64, FrameError> {
    let end = off.checked_add(ABI_WORD).ok_or(FrameError::Truncated { offset: off, need: ABI_WORD })?;
    if end > wire.len() {
        return Err(FrameError::Truncated { offset: off, need: end - wire.len() });
    }
    let word = &wire[off..end];
    if word[..ABI_WORD - 8].iter().any(|b| *b != 0) {
        return Err(FrameError::NonCanonical(format!("word at {} exceeds u64", off)));
    }
    Ok(BigEndian::read_u64(&word[ABI_WORD - 8..]))
}

#[inline]
fn to_usize(v: u64, what: &str) -> Result<usize, FrameError> {
    usize::try_from(v).map_err(|_| FrameError::NonCanonical(format!("{} {} exceeds address space", what, v)))
}

fn decode_packed(wire: &[u8]) -> Result<Vec<&[u8]>, FrameError> {
    let declared = read_u32(wire, 0)? as u64;
    let mut off = PACKED_LEN_FIELD;

    // Never trust the declared count for allocation.
    let mut out = Vec::with_capacity((declared as usize).min(wire.len() / PACKED_LEN_FIELD));

    for index in 0..declared as usize {
        if off == wire.len() {
            return Err(FrameError::CountMismatch { declared, recovered: index as u64 });
        }
        let len = read_u32(wire, off)? as usize;
        off += PACKED_LEN_FIELD;

        let available = wire.len() - off;
        if len > available {
            return Err(FrameError::LengthOverrun { index, declared: len as u64, available });
        }
        out.push(&wire[off..off + len]);
        off += len;
    }

    if off != wire.len() {
        return Err(FrameError::TrailingBytes { extra: wire.len() - off });
    }
    Ok(out)
}

fn decode_abi(wire: &[u8]) -> Result<Vec<&[u8]>, FrameError> {
    let head = read_word(wire, 0)?;
    if head != ABI_HEAD_OFFSET {
        return Err(FrameError::NonCanonical(format!("head offset {:#x}, expected {:#x}", head, ABI_HEAD_OFFSET)));
    }
    let declared = read_word(wire, ABI_WORD)?;
    let base = 2 * ABI_WORD;

    let table_slots = (wire.len() - base) / ABI_WORD;
    if declared > table_slots as u64 {
        return Err(FrameError::CountMismatch { declared, recovered: table_slots as u64 });
    }
    let count = declared as usize;

    let mut out = Vec::with_capacity(count);
    // Canonical offset of the next entry, relative to `base`.
    let mut expected = count * ABI_WORD;

    for index in 0..count {
        let off = to_usize(read_word(wire, base + index * ABI_WORD)?, "offset")?;
        if off != expected {
            return Err(FrameError::NonCanonical(format!(
                "item {} offset {:#x}, expected {:#x}",
                index, off, expected
            )));
        }

        let entry = base + off;
        if entry == wire.len() {
            return Err(FrameError::CountMismatch { declared, recovered: index as u64 });
        }
        let len_word = read_word(wire, entry)?;
        let data = entry + ABI_WORD;
        let available = wire.len() - data;
        let len = to_usize(len_word, "length")?;
        if len > available {
            return Err(FrameError::LengthOverrun { index, declared: len_word, available });
        }

        let padded = abi_padded(len);
        if padded > available {
            return Err(FrameError::Truncated { offset: data + len, need: padded - available });
        }
        if wire[data + len..data + padded].iter().any(|b| *b != 0) {
            return Err(FrameError::NonCanonical(format!("item {} has non-zero padding", index)));
        }

        out.push(&wire[data..data + len]);
        expected += ABI_WORD + padded;
    }

    let end = base + expected;
    if end != wire.len() {
        return Err(FrameError::TrailingBytes { extra: wire.len().saturating_sub(end) });
    }
    Ok(out)
}
