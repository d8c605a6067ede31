//! Support resolution layer
//! - resolver.rs: tri-state resolution of raw statements, feature-level collapse
//! - finder.rs: newest-to-oldest walk locating the initial supporting release

pub mod finder;
pub mod resolver;

pub use finder::{initial_support, InitialSupport};
pub use resolver::{feature_support, resolve_statement, FeatureSupport, Qualifications, Support};
