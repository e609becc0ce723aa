//! In-memory registry: decodes pages exactly as the on-chain descriptor
//! does and keeps the records per category. Used for dry runs and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::constants::DEFAULT_MAX_COLLECTION_SIZE;
use crate::framing::{AssetRecord, FrameLayout};
use crate::page::{decode_page, Page};
use crate::registry::traits::DescriptorRegistry;
use crate::registry::types::SubmissionError;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub struct InMemoryRegistry {
    id: u64,
    layout: FrameLayout,
    max_collection_size: u64,
    categories: HashMap<String, Vec<AssetRecord>>,
    backgrounds: Vec<String>,
    palettes: BTreeMap<u8, Vec<u8>>,
    appends: u64,
}

impl InMemoryRegistry {
    pub fn new(layout: FrameLayout) -> Self {
        Self::with_capacity_limit(layout, DEFAULT_MAX_COLLECTION_SIZE)
    }

    pub fn with_capacity_limit(layout: FrameLayout, max_collection_size: u64) -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            layout,
            max_collection_size,
            categories: HashMap::new(),
            backgrounds: Vec::new(),
            palettes: BTreeMap::new(),
            appends: 0,
        }
    }

    /// Stored records for `category`, in index order.
    pub fn records(&self, category: &str) -> &[AssetRecord] {
        self.categories.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn backgrounds(&self) -> &[String] {
        &self.backgrounds
    }

    pub fn palette(&self, index: u8) -> Option<&[u8]> {
        self.palettes.get(&index).map(Vec::as_slice)
    }

    /// Successful `append_page` calls so far.
    pub fn appends(&self) -> u64 {
        self.appends
    }
}

impl DescriptorRegistry for InMemoryRegistry {
    fn target_id(&self) -> String {
        format!("memory-{}", self.id)
    }

    fn append_page(&mut self, category: &str, page: &Page) -> Result<(u64, u64), SubmissionError> {
        let records = decode_page(page, self.layout).map_err(|e| SubmissionError::Rejected {
            category: category.to_string(),
            reason: e.to_string(),
        })?;

        let stored = self.categories.entry(category.to_string()).or_default();
        let start = stored.len() as u64;
        let end = start + records.len() as u64;
        if end > self.max_collection_size {
            return Err(SubmissionError::Rejected {
                category: category.to_string(),
                reason: format!("collection full: {} + {} > {}", start, records.len(), self.max_collection_size),
            });
        }

        stored.extend(records);
        self.appends += 1;
        debug!(category, start, end, "registry append");
        Ok((start, end))
    }

    fn current_index_count(&self, category: &str) -> Result<u64, SubmissionError> {
        Ok(self.records(category).len() as u64)
    }

    fn add_backgrounds(&mut self, colors: &[String]) -> Result<(), SubmissionError> {
        self.backgrounds.extend_from_slice(colors);
        Ok(())
    }

    fn set_palette(&mut self, index: u8, palette: &[u8]) -> Result<(), SubmissionError> {
        self.palettes.insert(index, palette.to_vec());
        Ok(())
    }
}
