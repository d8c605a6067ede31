//! Support-map collation across compat keys
//!
//! A feature queried with ancestor roll-up produces one support map per
//! compat key. Collation folds them into one map per browser: support of
//! an ancestor is a prerequisite, so the feature's initial support is
//! bounded by its latest component.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::support::finder::InitialSupport;

/// Per-browser initial-support outcomes
///
/// `None` records "no supporting release identified" (unknown). A browser
/// absent from the map entirely was never queried; the two are distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportMap {
    entries: BTreeMap<String, Option<InitialSupport>>,
}

impl SupportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, browser_id: impl Into<String>, support: Option<InitialSupport>) {
        self.entries.insert(browser_id.into(), support);
    }

    /// Outer `None`: browser not queried. Inner `None`: queried, unknown.
    pub fn get(&self, browser_id: &str) -> Option<&Option<InitialSupport>> {
        self.entries.get(browser_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&InitialSupport>)> + '_ {
        self.entries
            .iter()
            .map(|(browser, support)| (browser.as_str(), support.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True when `candidate` introduced support more recently than `best`
///
/// A later release index wins; on equal indices an exact version is more
/// recent than a ranged `≤V`.
fn more_recent(candidate: &InitialSupport, best: &InitialSupport) -> bool {
    match candidate.release().index().cmp(&best.release().index()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => best.is_ranged() && !candidate.is_ranged(),
    }
}

/// Collate per-key support maps into one
///
/// The output covers the union of the input browsers. A browser unknown in
/// any input stays unknown; otherwise the most recent initial support wins.
pub fn aggregate(maps: &[SupportMap]) -> SupportMap {
    let mut out = SupportMap::new();
    for map in maps {
        for (browser, support) in map.iter() {
            let merged = match (out.get(browser), support) {
                // first sighting of this browser
                (None, incoming) => incoming.cloned(),
                // unknown on either side poisons the aggregate
                (Some(_), None) | (Some(None), Some(_)) => None,
                (Some(Some(best)), Some(candidate)) => {
                    if more_recent(candidate, best) {
                        Some(candidate.clone())
                    } else {
                        Some(best.clone())
                    }
                }
            };
            out.insert(browser, merged);
        }
    }
    out
}
