//! Version parsing and comparison for browser release strings
//!
//! BCD release versions are not semver: they run from one to four dotted
//! components ("15", "1.5", "10.0.1"), occasionally carry vendor suffixes,
//! and include the synthetic "preview" release. Comparison is
//! dotted-numeric: strip characters that are neither digits nor dots,
//! split on `.`, pad the shorter side with zeros, compare component-wise.
//!
//! A version string prefixed `≤` is *ranged*: the feature is supported by
//! that release, but the actual introduction may lie earlier. [`Version`]
//! carries the marker so callers never re-scan for the prefix.

use std::cmp::Ordering;

/// Prefix marking a ranged version or date ("supported at or before")
pub const RANGED_PREFIX: char = '≤';

/// A version string with its ranged marker split out
///
/// `≤37` parses to `raw: "37", ranged: true`; `37` parses to
/// `raw: "37", ranged: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    ranged: bool,
}

impl Version {
    /// Split the ranged marker off a raw version string
    pub fn parse(version: &str) -> Self {
        match version.strip_prefix(RANGED_PREFIX) {
            Some(rest) => Self {
                raw: rest.to_string(),
                ranged: true,
            },
            None => Self {
                raw: version.to_string(),
                ranged: false,
            },
        }
    }

    /// The version string without any ranged marker
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_ranged(&self) -> bool {
        self.ranged
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ranged {
            write!(f, "{RANGED_PREFIX}{}", self.raw)
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

/// Numeric components of a version string, suffixes stripped
///
/// "10.0a1" -> [10, 0, 1]; "preview" -> [0]
fn components(version: &str) -> Vec<u64> {
    let digits: String = version
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}

/// Compare two version strings by dotted numeric components
///
/// The shorter component list is padded with zeros, so "3" sorts before
/// "3.1" and after "2.9.9". Strings without digits compare as zero.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = components(a);
    let mut right = components(b);
    let len = left.len().max(right.len());
    left.resize(len, 0);
    right.resize(len, 0);
    left.cmp(&right)
}
