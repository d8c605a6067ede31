//! Compat data layer
//! - types.rs: raw BCD serde shapes (statements, releases, records)
//! - tree.rs: the `Compat` access context with its lazy caches
//! - feature.rs: per-key feature records

pub mod feature;
pub mod tree;
pub mod types;

pub use feature::Feature;
pub use tree::Compat;
pub use types::{
    BrowserData, CompatRecord, FlagStatement, ReleaseData, ReleaseStatus, SupportList,
    SupportStatement, VersionValue,
};
