//! Raw BCD data shapes
//!
//! Serde bindings for the fragments of the browser-compat-data JSON the
//! engine reads: release records under `browsers.<id>` and the `__compat`
//! records on feature nodes. Fields the engine never interprets
//! (`spec_url`, `mdn_url`, notes text) are ignored on input.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// `false`, an exact version string, or a ranged `≤V` string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Flag(bool),
    Version(String),
}

/// A runtime or preference flag gating support
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlagStatement {
    #[serde(rename = "type")]
    pub flag_type: String,
    pub name: String,
    pub value_to_set: Option<String>,
}

/// One raw support statement for a (feature, browser) pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupportStatement {
    pub version_added: VersionValue,
    pub version_removed: Option<VersionValue>,
    #[serde(default)]
    pub flags: Vec<FlagStatement>,
    pub prefix: Option<String>,
    pub alternative_name: Option<String>,
    #[serde(default)]
    pub partial_implementation: bool,
}

/// One or many support statements, normalized to a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SupportList {
    One(SupportStatement),
    Many(Vec<SupportStatement>),
}

impl SupportList {
    pub fn into_vec(self) -> Vec<SupportStatement> {
        match self {
            SupportList::One(statement) => vec![statement],
            SupportList::Many(statements) => statements,
        }
    }
}

/// The `status` block of a `__compat` record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusBlock {
    #[serde(default)]
    pub deprecated: bool,
}

/// The `__compat` record on a feature node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompatRecord {
    #[serde(default)]
    pub support: HashMap<String, SupportList>,
    pub status: Option<StatusBlock>,
}

/// Lifecycle status of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Retired,
    Current,
    Esr,
    Beta,
    Nightly,
    Planned,
}

impl ReleaseStatus {
    /// Beta, nightly, and planned releases have not shipped to stable
    pub fn is_prerelease(self) -> bool {
        matches!(
            self,
            ReleaseStatus::Beta | ReleaseStatus::Nightly | ReleaseStatus::Planned
        )
    }
}

/// One release under `browsers.<id>.releases`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseData {
    pub release_date: Option<NaiveDate>,
    pub status: ReleaseStatus,
}

/// A `browsers.<id>` record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrowserData {
    pub name: String,
    pub preview_name: Option<String>,
    pub releases: HashMap<String, ReleaseData>,
}
