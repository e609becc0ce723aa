// Raw deflate adaptor: roundtrip, CorruptPayload detection, level checks.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use trait_pager::compression::{
        codec_ids, compress, decompress, CompressionCodec, CompressionError, Compressor, Decompressor, DeflateRawCompressor,
        DeflateRawDecompressor, MAX_FRAME_SIZE,
    };

    fn run_lengths() -> Vec<u8> {
        // Shaped like pixel-run data: long repeats, few distinct bytes.
        let mut out = Vec::new();
        for i in 0..400u32 {
            out.push((i % 7) as u8);
            out.push(((i * 13) % 5) as u8);
        }
        out
    }

// # 1. Roundtrip

    #[test]
    fn compress_decompress_roundtrip() {
        let input = run_lengths();
        let packed = compress(&input, 9).unwrap();
        assert!(packed.len() < input.len());
        assert_eq!(decompress(&packed, input.len()).unwrap(), input);
    }

    #[test]
    fn empty_input_roundtrip() {
        let packed = compress(&[], 9).unwrap();
        assert!(!packed.is_empty());
        assert!(decompress(&packed, 0).unwrap().is_empty());
    }

    #[test]
    fn every_level_is_invertible() {
        let input = run_lengths();
        for level in 0..=9 {
            let packed = compress(&input, level).unwrap();
            assert_eq!(decompress(&packed, input.len()).unwrap(), input, "level {}", level);
        }
    }

    #[test]
    fn output_is_headerless() {
        // A zlib stream would start with 0x78; raw deflate at level 9 on
        // this input starts with a block header instead.
        let packed = compress(&run_lengths(), 9).unwrap();
        let zlib = looks_like_zlib(&packed);
        assert!(!zlib, "raw deflate must not carry a zlib header");
    }

    fn looks_like_zlib(b: &[u8]) -> bool {
        b.len() >= 2 && b[0] == 0x78 && ((b[0] as u16) << 8 | b[1] as u16) % 31 == 0
    }

    #[test]
    fn trait_objects_are_usable() {
        let mut c: Box<dyn Compressor> = Box::new(DeflateRawCompressor::new(6).unwrap());
        let mut d: Box<dyn Decompressor> = Box::new(DeflateRawDecompressor::new());
        let input = run_lengths();

        let mut packed = Vec::new();
        c.compress_frame(&input, &mut packed).unwrap();
        let mut out = vec![0xEE];
        d.decompress_frame(&packed, input.len(), &mut out).unwrap();
        assert_eq!(out[0], 0xEE);
        assert_eq!(&out[1..], input.as_slice());
    }

// # 2. CorruptPayload paths

    #[test]
    fn declared_length_too_small() {
        let input = run_lengths();
        let packed = compress(&input, 9).unwrap();
        let err = decompress(&packed, input.len() - 1).unwrap_err();
        assert!(err.is_corrupt_payload());
        assert!(matches!(err, CompressionError::LengthMismatch { .. }));
    }

    #[test]
    fn declared_length_too_large() {
        let input = run_lengths();
        let packed = compress(&input, 9).unwrap();
        assert_eq!(
            decompress(&packed, input.len() + 10),
            Err(CompressionError::LengthMismatch { expected: input.len() + 10, actual: input.len() })
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let input = run_lengths();
        let mut packed = compress(&input, 9).unwrap();
        packed.extend_from_slice(&[0xDE, 0xAD]);
        assert_eq!(
            decompress(&packed, input.len()),
            Err(CompressionError::TrailingBytes { trailing: 2 })
        );
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let input = run_lengths();
        let packed = compress(&input, 9).unwrap();
        let err = decompress(&packed[..packed.len() - 1], input.len()).unwrap_err();
        assert!(err.is_corrupt_payload(), "got {:?}", err);
    }

    #[test]
    fn reserved_block_type_is_rejected() {
        let input = run_lengths();
        let mut packed = compress(&input, 9).unwrap();
        // BTYPE = 0b11 is reserved by RFC 1951.
        packed[0] |= 0b0000_0110;
        let err = decompress(&packed, input.len()).unwrap_err();
        assert!(matches!(err, CompressionError::CorruptPayload(_)));
    }

    #[test]
    fn empty_input_is_not_a_stream() {
        assert!(decompress(&[], 0).unwrap_err().is_corrupt_payload());
    }

// # 3. Limits

    #[test]
    fn invalid_level_is_rejected() {
        assert!(matches!(compress(b"abc", 10), Err(CompressionError::InvalidLevel(10))));
    }

    #[test]
    fn absurd_declared_length_is_refused_before_allocating() {
        let packed = compress(b"abc", 9).unwrap();
        assert!(matches!(
            decompress(&packed, MAX_FRAME_SIZE + 1),
            Err(CompressionError::FrameTooLarge { .. })
        ));
    }

    #[test]
    fn codec_id_is_stable() {
        assert_eq!(CompressionCodec::try_from(codec_ids::DEFLATE_RAW).unwrap(), CompressionCodec::DeflateRaw);
        assert!(CompressionCodec::try_from(1u16).is_err());
        assert_eq!(CompressionCodec::DeflateRaw.name(), "deflate-raw");
    }

    proptest! {
        #[test]
        fn prop_roundtrip(input in prop::collection::vec(any::<u8>(), 0..4096), level in 0u32..=9) {
            let packed = compress(&input, level).unwrap();
            prop_assert_eq!(decompress(&packed, input.len()).unwrap(), input);
        }
    }
}
