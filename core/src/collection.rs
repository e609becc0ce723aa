use crate::framing::AssetRecord;

/// Ordered records of one trait category.
///
/// Position is identity: the registry assigns indices in this order and
/// token seeds refer to those indices, so records are never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub category: String,
    pub records: Vec<AssetRecord>,
}

impl Collection {
    pub fn new(category: impl Into<String>, records: Vec<AssetRecord>) -> Self {
        Self { category: category.into(), records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of record lengths, excluding framing.
    pub fn payload_bytes(&self) -> usize {
        self.records.iter().map(Vec::len).sum()
    }
}
