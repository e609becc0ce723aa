//! Pages: compressed frames plus the metadata the registry needs.

pub mod types;
pub mod builder;
pub mod decoder;

pub use types::{Page, PageError, PageOptions};
pub use builder::build_page;
pub use decoder::decode_page;
