use crate::page::Page;
use crate::registry::types::SubmissionError;

/// Call surface of the append-only, index-ordered descriptor registry.
///
/// The registry's per-category index counter is the only shared state the
/// plan ordering depends on; it is reached exclusively through these
/// calls. Index ranges are half-open: `(start, end)` covers `start..end`.
pub trait DescriptorRegistry {
    /// Identity of the target registry. Submission locks are keyed on
    /// `(target_id, category)`.
    fn target_id(&self) -> String;

    /// Decode `page` and append its records at the category's next index.
    /// No deduplication: submitting the same page twice stores it twice.
    fn append_page(&mut self, category: &str, page: &Page) -> Result<(u64, u64), SubmissionError>;

    /// Records currently stored for `category`. Read-only.
    fn current_index_count(&self, category: &str) -> Result<u64, SubmissionError>;

    /// Append background colors (hex strings without `#`).
    fn add_backgrounds(&mut self, colors: &[String]) -> Result<(), SubmissionError>;

    /// Replace palette `index` with packed RGB bytes.
    fn set_palette(&mut self, index: u8, palette: &[u8]) -> Result<(), SubmissionError>;
}
