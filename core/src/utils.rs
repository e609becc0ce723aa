/// CRC32 of `data`.
pub fn compute_checksum(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// First 8 hex chars of the BLAKE3 hash of `line`. Short enough for a log
/// column, long enough to catch a damaged line.
pub fn line_checksum(line: &str) -> String {
    let hash = blake3::hash(line.as_bytes());
    hash.to_hex()[..8usize].to_string()
}

/// Decode a hex string with or without the `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    hex::decode(digits)
}

/// Serde adaptor: `Vec<u8>` as a `0x`-prefixed hex string.
pub mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(d)?;
        super::decode_hex(&raw).map_err(D::Error::custom)
    }
}
