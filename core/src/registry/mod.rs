//! Registry collaborator: call contract plus an in-memory implementation.

pub mod types;
pub mod traits;
pub mod memory;

pub use types::SubmissionError;
pub use traits::DescriptorRegistry;
pub use memory::InMemoryRegistry;
