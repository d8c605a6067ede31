//! Baseline status computation
//!
//! # Data flow
//!
//! ```text
//! compat keys ──▶ ancestor expansion ──▶ per-key, per-browser
//!                                        initial support
//!                                              │
//!                                              ▼
//!                  keystone date ◀──── aggregated support map
//!                       │
//!                       ▼
//!               Baseline label + dates
//! ```
//!
//! # Modules
//!
//! - [`aggregate`]: support-map collation across compat keys
//! - [`status`]: keystone derivation, status mapping, the public
//!   [`compute_baseline`](status::compute_baseline) and
//!   [`get_status`](status::get_status) operations

pub mod aggregate;
pub mod status;

pub use aggregate::{aggregate, SupportMap};
pub use status::{
    compute_baseline, get_status, keystone_date, keystone_date_to_status, Baseline,
    BaselineStatus, FeatureSelector, StatusDates,
};
