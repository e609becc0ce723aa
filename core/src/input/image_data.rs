//! Static image-data input.
//!
//! ```json
//! {
//!   "bgcolors": ["d5d7e1", "e1d7d5"],
//!   "palette":  ["", "ffffff", "c5b9a1"],
//!   "images": {
//!     "bodies": [{ "filename": "body-bege", "data": "0x0015171f09..." }],
//!     "heads":  [...]
//!   }
//! }
//! ```
//!
//! Category order in `images` is kept as written: it is the order the
//! categories get populated in.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::collection::Collection;
use crate::constants::PALETTE_TRANSPARENT;
use crate::utils::decode_hex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("image data I/O: {0}")]
    Io(String),

    #[error("image data parse error: {0}")]
    Parse(String),

    #[error("{category}[{index}] is not valid hex: {reason}")]
    InvalidHex { category: String, index: usize, reason: String },

    #[error("palette[{index}] = {value:?} is not a 6-digit hex color")]
    InvalidColor { index: usize, value: String },

    #[error("category {0:?} appears more than once")]
    DuplicateCategory(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageEntry {
    #[serde(default)]
    pub filename: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCategory {
    pub name: String,
    pub entries: Vec<ImageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub bgcolors: Vec<String>,
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(deserialize_with = "ordered_categories")]
    pub images: Vec<ImageCategory>,
}

fn ordered_categories<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ImageCategory>, D::Error> {
    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<ImageCategory>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of category name to image entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::new();
            while let Some((name, entries)) = map.next_entry::<String, Vec<ImageEntry>>()? {
                out.push(ImageCategory { name, entries });
            }
            Ok(out)
        }
    }

    d.deserialize_map(CategoriesVisitor)
}

impl ImageData {
    pub fn from_json_str(s: &str) -> Result<Self, InputError> {
        let data: Self = serde_json::from_str(s).map_err(|e| InputError::Parse(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| InputError::Io(e.to_string()))?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), InputError> {
        for (i, cat) in self.images.iter().enumerate() {
            if self.images[..i].iter().any(|c| c.name == cat.name) {
                return Err(InputError::DuplicateCategory(cat.name.clone()));
            }
        }
        Ok(())
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|c| c.name.as_str())
    }

    /// Decode every category into a collection, in file order.
    pub fn collections(&self) -> Result<Vec<Collection>, InputError> {
        self.images
            .iter()
            .map(|cat| {
                let records = cat
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        decode_hex(&entry.data).map_err(|e| InputError::InvalidHex {
                            category: cat.name.clone(),
                            index,
                            reason: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Collection::new(cat.name.clone(), records))
            })
            .collect()
    }

    /// Packed RGB palette: the transparent color, then every listed color.
    /// Empty entries contribute nothing (they stand for the transparent
    /// slot already at the front).
    pub fn palette_bytes(&self) -> Result<Vec<u8>, InputError> {
        let mut out = PALETTE_TRANSPARENT.to_vec();
        for (index, color) in self.palette.iter().enumerate() {
            let digits = color.trim_start_matches('#');
            if digits.is_empty() {
                continue;
            }
            let rgb = match decode_hex(digits) {
                Ok(rgb) if rgb.len() == 3 => rgb,
                _ => return Err(InputError::InvalidColor { index, value: color.clone() }),
            };
            out.extend_from_slice(&rgb);
        }
        Ok(out)
    }
}
