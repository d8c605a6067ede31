//! Browser release catalogs
//!
//! Builds the ordered release list for one browser from its BCD record:
//! releases sorted ascending by version, each carrying its position in the
//! order for O(1) range tests, with a synthetic "preview" release appended
//! when the browser declares one.

use chrono::NaiveDate;
use tracing::debug;

use crate::compat::types::{BrowserData, ReleaseStatus};
use crate::error::Error;
use crate::version::compare_versions;

/// Browsers that form the Baseline quorum, in observable order
pub const CORE_BROWSER_SET: [&str; 7] = [
    "chrome",
    "chrome_android",
    "edge",
    "firefox",
    "firefox_android",
    "safari",
    "safari_ios",
];

/// Version string of the synthetic preview release
pub const PREVIEW_VERSION: &str = "preview";

/// One release of one browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    browser_id: String,
    version: String,
    date: Option<NaiveDate>,
    status: ReleaseStatus,
    index: usize,
}

impl Release {
    /// Id of the browser this release belongs to
    pub fn browser_id(&self) -> &str {
        &self.browser_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ship date; `None` for unreleased versions
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn status(&self) -> ReleaseStatus {
        self.status
    }

    /// Position in the browser's version-ordered release list
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_prerelease(&self) -> bool {
        self.status.is_prerelease()
    }

    /// Index-interval test: inclusive lower bound, exclusive upper
    pub fn in_range(&self, start: &Release, end: Option<&Release>) -> bool {
        self.index >= start.index && end.map_or(true, |e| self.index < e.index)
    }
}

/// One browser and its version-ordered releases
#[derive(Debug, Clone)]
pub struct Browser {
    id: String,
    name: String,
    releases: Vec<Release>,
}

impl Browser {
    /// Build the catalog from a BCD `browsers.<id>` record
    pub fn from_data(id: &str, data: BrowserData) -> Self {
        let mut entries: Vec<_> = data.releases.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| compare_versions(a, b));

        let mut releases: Vec<Release> = entries
            .into_iter()
            .enumerate()
            .map(|(index, (version, release))| Release {
                browser_id: id.to_string(),
                version,
                date: release.release_date,
                status: release.status,
                index,
            })
            .collect();

        if data.preview_name.is_some() {
            releases.push(Release {
                browser_id: id.to_string(),
                version: PREVIEW_VERSION.to_string(),
                date: None,
                status: ReleaseStatus::Nightly,
                index: releases.len(),
            });
        }

        debug!(browser = id, releases = releases.len(), "built release catalog");

        Self {
            id: id.to_string(),
            name: data.name,
            releases,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable browser name from BCD
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All releases, ascending by version
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// The unique release with status `current`
    pub fn current(&self) -> Result<&Release, Error> {
        let mut found = None;
        for release in &self.releases {
            if release.status == ReleaseStatus::Current {
                if found.is_some() {
                    return Err(Error::NoCurrentRelease(self.id.clone()));
                }
                found = Some(release);
            }
        }
        found.ok_or_else(|| Error::NoCurrentRelease(self.id.clone()))
    }

    /// Look up a release by its exact version string, no normalization
    pub fn release(&self, version: &str) -> Result<&Release, Error> {
        self.releases
            .iter()
            .find(|release| release.version == version)
            .ok_or_else(|| Error::UnknownVersion {
                browser: self.id.clone(),
                version: version.to_string(),
            })
    }
}
