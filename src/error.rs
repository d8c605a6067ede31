//! Engine error taxonomy
//!
//! Every variant is a programming or data-integrity error; none are
//! retryable. Legitimately unknown support is a value
//! ([`Support::Unknown`](crate::support::Support::Unknown)), not an error.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A dotted compat path does not exist in the tree
    #[error("compat key not found: {0}")]
    InvalidPath(String),

    /// The addressed node carries no usable `__compat` record
    #[error("no usable compat record at {0}")]
    MissingCompatRecord(String),

    /// `__compat.support` has no entry for a queried browser
    #[error("feature {key} has no support entry for browser {browser}")]
    MissingBrowserSupport { key: String, browser: String },

    /// A support statement names a version absent from the browser's releases
    #[error("browser {browser} has no release {version}")]
    UnknownVersion { browser: String, version: String },

    /// A browser declares no unique release with status `current`
    #[error("browser {0} has no unique current release")]
    NoCurrentRelease(String),

    /// A release from one browser was passed into a query for another
    #[error("release {version} belongs to {actual}, not {expected}")]
    BrowserReleaseMismatch {
        version: String,
        actual: String,
        expected: String,
    },
}
