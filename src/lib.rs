//! Baseline status computation over browser-compat data
//!
//! Given an in-memory BCD tree, this crate determines when a web platform
//! feature became interoperably available across the core browser set and
//! labels it `false`, `"low"`, or `"high"`, where high means 30 months
//! have passed since the last core browser shipped support.
//!
//! Entry points:
//!
//! - [`Compat`]: wrap a parsed BCD tree
//! - [`compute_baseline`]: full status for a set of compat keys
//! - [`get_status`]: serialized status for a single key, ancestors included
//! - [`keystone_date_to_status`]: re-derive a status from a precomputed
//!   keystone date and cutoff

pub mod baseline;
pub mod browser;
pub mod compat;
pub mod dates;
pub mod error;
pub mod support;
pub mod version;

pub use baseline::{
    compute_baseline, get_status, keystone_date_to_status, Baseline, BaselineStatus,
    FeatureSelector, SupportMap,
};
pub use browser::{Browser, Release, CORE_BROWSER_SET};
pub use compat::Compat;
pub use dates::RangedDate;
pub use error::Error;
pub use support::InitialSupport;
