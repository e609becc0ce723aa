//! trait-pager-core
//!
//! Pages trait-image records into compressed, budget-sized blobs for an
//! append-only on-chain registry, and decodes them back byte-for-byte.
//! Pure Rust, synchronous, no network.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod config;
pub mod types;
pub mod utils;
pub mod collection;

// Codec layers
pub mod framing;
pub mod compression;
pub mod page;
pub mod pager;
pub mod telemetry;

// Registry side
pub mod registry;
pub mod submit;
pub mod recovery;

// Input and orchestration
pub mod input;
pub mod populate;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::collection::Collection;
    pub use crate::config::{PagerConfig, SubmitConfig};
    pub use crate::framing::{decode_frame, encode_frame, AssetRecord, FrameLayout};
    pub use crate::page::{build_page, decode_page, Page, PageOptions};
    pub use crate::pager::{plan, plan_collection, verify_plan, SubmissionPlan};
    pub use crate::registry::{DescriptorRegistry, InMemoryRegistry};
    pub use crate::submit::submit_plan;
    pub use crate::types::PagerError;
}
