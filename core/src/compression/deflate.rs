//! Raw (headerless) deflate via flate2.
//!
//! No zlib header, no adler32, no length prefix: the page carries
//! `original_length` and is the only integrity signal besides the stream
//! structure itself.

use std::io::Write;

use flate2::{write::DeflateEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::compression::constants::{MAX_FRAME_SIZE, MAX_LEVEL_DEFLATE};
use crate::compression::types::{CompressionCodec, CompressionError, Compressor, Decompressor};

const CODEC: &str = CompressionCodec::DeflateRaw.name();

pub struct DeflateRawCompressor {
    level: Compression,
}

impl DeflateRawCompressor {
    pub fn new(level: u32) -> Result<Self, CompressionError> {
        if level > MAX_LEVEL_DEFLATE {
            return Err(CompressionError::InvalidLevel(level));
        }
        Ok(Self { level: Compression::new(level) })
    }
}

impl Compressor for DeflateRawCompressor {
    fn compress_frame(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if input.len() > MAX_FRAME_SIZE {
            return Err(CompressionError::FrameTooLarge { have: input.len(), max: MAX_FRAME_SIZE });
        }

        let mut enc = DeflateEncoder::new(out, self.level);
        enc.write_all(input)
            .map_err(|e| CompressionError::CodecProcessFailed { codec: CODEC, msg: e.to_string() })?;
        enc.finish()
            .map_err(|e| CompressionError::CodecProcessFailed { codec: CODEC, msg: e.to_string() })?;
        Ok(())
    }
}

#[derive(Default)]
pub struct DeflateRawDecompressor;

impl DeflateRawDecompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Decompressor for DeflateRawDecompressor {
    fn decompress_frame(&mut self, input: &[u8], expected_len: usize, out: &mut Vec<u8>) -> Result<(), CompressionError> {
        if expected_len > MAX_FRAME_SIZE {
            return Err(CompressionError::FrameTooLarge { have: expected_len, max: MAX_FRAME_SIZE });
        }

        // One spare byte of capacity: a stream that fills it is too long.
        let mut buf = Vec::with_capacity(expected_len + 1);
        let mut inflater = Decompress::new(false);

        loop {
            let consumed = inflater.total_in() as usize;
            let produced = buf.len();

            let status = inflater
                .decompress_vec(&input[consumed..], &mut buf, FlushDecompress::Finish)
                .map_err(|e| CompressionError::CorruptPayload(e.to_string()))?;

            match status {
                Status::StreamEnd => break,
                Status::Ok | Status::BufError => {
                    if buf.len() > expected_len {
                        return Err(CompressionError::LengthMismatch { expected: expected_len, actual: buf.len() });
                    }
                    let progressed = inflater.total_in() as usize != consumed || buf.len() != produced;
                    if !progressed {
                        return Err(CompressionError::Truncated { produced: buf.len() });
                    }
                }
            }
        }

        let consumed = inflater.total_in() as usize;
        if consumed != input.len() {
            return Err(CompressionError::TrailingBytes { trailing: input.len() - consumed });
        }
        if buf.len() != expected_len {
            return Err(CompressionError::LengthMismatch { expected: expected_len, actual: buf.len() });
        }

        out.extend_from_slice(&buf);
        Ok(())
    }
}
