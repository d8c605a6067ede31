//! Tri-state support resolution
//!
//! Evaluates one raw support statement against one release, then collapses
//! a feature's statements for a browser into a single verdict. Releases
//! inside a ranged (`≤`) boundary resolve to [`Support::Unknown`] rather
//! than guessing either way.

use crate::browser::{Browser, Release};
use crate::compat::types::{FlagStatement, SupportStatement, VersionValue};
use crate::error::Error;
use crate::version::Version;

/// Non-plain caveats attached to a support statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifications {
    pub prefix: Option<String>,
    pub alternative_name: Option<String>,
    pub flags: Vec<FlagStatement>,
    pub partial_implementation: bool,
}

impl Qualifications {
    fn of(statement: &SupportStatement) -> Self {
        Self {
            prefix: statement.prefix.clone(),
            alternative_name: statement.alternative_name.clone(),
            flags: statement.flags.clone(),
            partial_implementation: statement.partial_implementation,
        }
    }

    /// True when no caveat is present
    pub fn is_plain(&self) -> bool {
        self.prefix.is_none()
            && self.alternative_name.is_none()
            && self.flags.is_empty()
            && !self.partial_implementation
    }
}

/// Outcome of resolving support for one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Support {
    /// Supported with no caveats
    SupportedPlain,
    /// Supported behind a prefix, alternative name, flag, or partially
    SupportedWithQuals(Qualifications),
    Unsupported,
    /// Inside a ranged boundary; no statement pins this release either way
    Unknown,
}

impl Support {
    fn supported(statement: &SupportStatement) -> Self {
        let quals = Qualifications::of(statement);
        if quals.is_plain() {
            Support::SupportedPlain
        } else {
            Support::SupportedWithQuals(quals)
        }
    }
}

/// Added/removed version fields, with bare booleans rejected
///
/// `version_added: false` short-circuits to unsupported before this runs;
/// bare `true` names no release and is a data-integrity error.
fn version_bound(value: &VersionValue, browser: &Browser) -> Result<Option<Version>, Error> {
    match value {
        VersionValue::Flag(true) => Err(Error::UnknownVersion {
            browser: browser.id().to_string(),
            version: "true".to_string(),
        }),
        VersionValue::Flag(false) => Ok(None),
        VersionValue::Version(v) => Ok(Some(Version::parse(v))),
    }
}

/// Resolve one statement for one release of `browser`
pub fn resolve_statement(
    statement: &SupportStatement,
    browser: &Browser,
    release: &Release,
) -> Result<Support, Error> {
    if release.browser_id() != browser.id() {
        return Err(Error::BrowserReleaseMismatch {
            version: release.version().to_string(),
            actual: release.browser_id().to_string(),
            expected: browser.id().to_string(),
        });
    }

    let added = match &statement.version_added {
        VersionValue::Flag(false) => return Ok(Support::Unsupported),
        value => match version_bound(value, browser)? {
            Some(version) => version,
            None => return Ok(Support::Unsupported),
        },
    };
    let removed = match &statement.version_removed {
        Some(value) => version_bound(value, browser)?,
        None => None,
    };

    let start = browser.release(added.raw())?;

    match removed {
        // Ranged removal: only the named introduction release is certain.
        // The span between it and the removal bound is unknowable.
        Some(until) if until.is_ranged() => {
            let until = browser.release(until.raw())?;
            if release.index() == start.index() {
                Ok(Support::supported(statement))
            } else if release.index() >= until.index() {
                Ok(Support::Unsupported)
            } else if !added.is_ranged() && release.index() < start.index() {
                Ok(Support::Unsupported)
            } else {
                Ok(Support::Unknown)
            }
        }
        removed => {
            let end = match removed {
                Some(until) => Some(browser.release(until.raw())?),
                None => None,
            };
            if release.in_range(start, end) {
                Ok(Support::supported(statement))
            } else if added.is_ranged() && release.index() < start.index() {
                Ok(Support::Unknown)
            } else {
                Ok(Support::Unsupported)
            }
        }
    }
}

/// Verdict for a feature in one release, across all of its statements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSupport {
    /// Some statement reports support with no qualifications
    Plain,
    /// No plain support, but some statement cannot rule the release out
    Unknown,
    Unsupported,
}

/// Collapse a feature's statements for one browser into a single verdict
pub fn feature_support(
    statements: &[SupportStatement],
    browser: &Browser,
    release: &Release,
) -> Result<FeatureSupport, Error> {
    let mut saw_unknown = false;
    for statement in statements {
        match resolve_statement(statement, browser, release)? {
            Support::SupportedPlain => return Ok(FeatureSupport::Plain),
            Support::Unknown => saw_unknown = true,
            Support::SupportedWithQuals(_) | Support::Unsupported => {}
        }
    }
    Ok(if saw_unknown {
        FeatureSupport::Unknown
    } else {
        FeatureSupport::Unsupported
    })
}
