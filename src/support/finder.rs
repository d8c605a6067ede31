//! Initial-support discovery
//!
//! Walks a browser's releases from the current release down to the oldest
//! to find the release that most recently *introduced* unbroken support.
//! Support must be continuous from the returned release up to current: a
//! gap of unsupported, or a stretch that cannot be confirmed, stops the
//! walk at the last confirmed introduction.

use crate::browser::{Browser, Release};
use crate::compat::types::SupportStatement;
use crate::error::Error;
use crate::support::resolver::{feature_support, FeatureSupport};
use crate::version::RANGED_PREFIX;

/// The release that most recently introduced support for one feature in
/// one browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialSupport {
    release: Release,
    ranged: bool,
}

impl InitialSupport {
    pub(crate) fn new(release: Release, ranged: bool) -> Self {
        Self { release, ranged }
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    /// True when the introduction was derived from a ranged (`≤`)
    /// statement: support started at or before this release
    pub fn is_ranged(&self) -> bool {
        self.ranged
    }

    /// Display form: `V` or `≤V`
    pub fn text(&self) -> String {
        if self.ranged {
            format!("{RANGED_PREFIX}{}", self.release.version())
        } else {
            self.release.version().to_string()
        }
    }
}

/// Find the most recent introduction of unbroken support
///
/// Anchors on the browser's current release. Returns `None` when the
/// current release itself is not plainly supported: an unknown at the
/// anchor means no supporting release can be confirmed at all.
pub fn initial_support(
    statements: &[SupportStatement],
    browser: &Browser,
) -> Result<Option<InitialSupport>, Error> {
    let current = browser.current()?;
    let releases = &browser.releases()[..=current.index()];

    let mut last_initial: Option<&Release> = None;
    let mut ranged = false;

    for release in releases.iter().rev() {
        match feature_support(statements, browser, release)? {
            FeatureSupport::Plain => {
                last_initial = Some(release);
                ranged = false;
            }
            FeatureSupport::Unknown => {
                if last_initial.is_none() {
                    return Ok(None);
                }
                ranged = true;
                break;
            }
            FeatureSupport::Unsupported => {
                if last_initial.is_none() {
                    return Ok(None);
                }
                break;
            }
        }
    }

    Ok(last_initial.map(|release| InitialSupport::new(release.clone(), ranged)))
}
