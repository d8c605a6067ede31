//! Keystone derivation and Baseline status
//!
//! The keystone date is the latest initial-support date across the core
//! browser set: the moment the feature became available everywhere. The
//! status maps that date, a cutoff clock, and the discouraged flag into
//! the final `false` / `"low"` / `"high"` label.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::baseline::aggregate::{aggregate, SupportMap};
use crate::browser::CORE_BROWSER_SET;
use crate::compat::feature::Feature;
use crate::compat::tree::Compat;
use crate::dates::RangedDate;
use crate::error::Error;
use crate::support::finder::initial_support;

/// The Baseline label, serialized as `false` / `"low"` / `"high"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    False,
    Low,
    High,
}

impl Serialize for Baseline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Baseline::False => serializer.serialize_bool(false),
            Baseline::Low => serializer.serialize_str("low"),
            Baseline::High => serializer.serialize_str("high"),
        }
    }
}

/// Label and dates derived from a keystone date, before the support map
/// is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDates {
    pub baseline: Baseline,
    pub baseline_low_date: Option<RangedDate>,
    pub baseline_high_date: Option<RangedDate>,
}

impl StatusDates {
    const FALSE: StatusDates = StatusDates {
        baseline: Baseline::False,
        baseline_low_date: None,
        baseline_high_date: None,
    };
}

/// A computed Baseline status for one feature
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineStatus {
    pub baseline: Baseline,
    pub baseline_low_date: Option<RangedDate>,
    pub baseline_high_date: Option<RangedDate>,
    pub discouraged: bool,
    pub support: SupportMap,
}

impl Serialize for BaselineStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("baseline", &self.baseline)?;
        if let Some(low) = &self.baseline_low_date {
            map.serialize_entry("baseline_low_date", &low.to_string())?;
        }
        if let Some(high) = &self.baseline_high_date {
            map.serialize_entry("baseline_high_date", &high.to_string())?;
        }
        map.serialize_entry("support", &SerializeSupport(&self.support))?;
        map.end()
    }
}

/// Serializes a support map in core-set order, omitting browsers without
/// an identified initial support
struct SerializeSupport<'a>(&'a SupportMap);

impl Serialize for SerializeSupport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for browser in CORE_BROWSER_SET {
            if let Some(Some(support)) = self.0.get(browser) {
                map.serialize_entry(browser, &support.text())?;
            }
        }
        for (browser, support) in self.0.iter() {
            if CORE_BROWSER_SET.contains(&browser) {
                continue;
            }
            if let Some(support) = support {
                map.serialize_entry(browser, &support.text())?;
            }
        }
        map.end()
    }
}

/// The latest initial-support date across the core browser set
///
/// `None` as soon as any core browser is unknown or its initial release
/// has no ship date. On a date tie, an exact introduction wins over a
/// ranged one as the keystone.
pub fn keystone_date(support: &SupportMap) -> Option<RangedDate> {
    let mut keystone: Option<RangedDate> = None;
    for browser in CORE_BROWSER_SET {
        let initial = support.get(browser)?.as_ref()?;
        let date = initial.release().date()?;
        let ranged = initial.is_ranged();
        let later = match keystone {
            None => true,
            Some(best) => date > best.date || (date == best.date && best.ranged && !ranged),
        };
        if later {
            keystone = Some(RangedDate::new(date, ranged));
        }
    }
    keystone
}

/// Map a keystone date to the Baseline label and its dates
///
/// Exposed so callers holding precomputed keystone dates can re-derive a
/// status against a different cutoff.
pub fn keystone_date_to_status(
    keystone: Option<RangedDate>,
    cutoff: NaiveDate,
    discouraged: bool,
) -> StatusDates {
    if discouraged {
        return StatusDates::FALSE;
    }
    let Some(low) = keystone else {
        return StatusDates::FALSE;
    };

    match low.high_date() {
        Some(high) if high.date <= cutoff => StatusDates {
            baseline: Baseline::High,
            baseline_low_date: Some(low),
            baseline_high_date: Some(high),
        },
        _ => StatusDates {
            baseline: Baseline::Low,
            baseline_low_date: Some(low),
            baseline_high_date: None,
        },
    }
}

/// Which compat keys to compute over, and how
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSelector {
    /// Dotted BCD compat keys
    pub compat_keys: Vec<String>,
    /// Also fold in each key's ancestors that carry their own compat record
    pub check_ancestors: bool,
    /// Record `unknown` instead of failing when a queried browser has no
    /// entry in `__compat.support`
    pub missing_support_as_unknown: bool,
}

impl FeatureSelector {
    /// Selector over the given keys, without ancestor roll-up and with
    /// strict missing-support handling
    pub fn new<I, K>(compat_keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            compat_keys: compat_keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_ancestors(mut self) -> Self {
        self.check_ancestors = true;
        self
    }
}

/// Compute the Baseline status for one feature
pub fn compute_baseline(selector: &FeatureSelector, compat: &Compat) -> Result<BaselineStatus, Error> {
    let mut keys: Vec<String> = Vec::new();
    for key in &selector.compat_keys {
        if selector.check_ancestors {
            for expanded in compat.ancestors(key)? {
                if !keys.contains(&expanded) {
                    keys.push(expanded);
                }
            }
        } else if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    debug!(keys = keys.len(), "computing baseline");

    let mut discouraged = false;
    let mut maps = Vec::with_capacity(keys.len());
    for key in &keys {
        let feature = compat.feature(key)?;
        discouraged |= feature.deprecated() == Some(true);
        maps.push(support_map_for(&feature, selector, compat)?);
    }

    let support = aggregate(&maps);
    let keystone = keystone_date(&support);
    let cutoff = compat.cutoff_date()?;
    let dates = keystone_date_to_status(keystone, cutoff, discouraged);

    Ok(BaselineStatus {
        baseline: dates.baseline,
        baseline_low_date: dates.baseline_low_date,
        baseline_high_date: dates.baseline_high_date,
        discouraged,
        support,
    })
}

/// Per-browser initial support for one feature across the core set
fn support_map_for(
    feature: &Feature,
    selector: &FeatureSelector,
    compat: &Compat,
) -> Result<SupportMap, Error> {
    let mut map = SupportMap::new();
    for browser_id in CORE_BROWSER_SET {
        let browser = compat.browser(browser_id)?;
        match feature.support_for(browser_id) {
            Ok(statements) => {
                map.insert(browser_id, initial_support(statements, &browser)?);
            }
            Err(Error::MissingBrowserSupport { .. }) if selector.missing_support_as_unknown => {
                warn!(
                    feature = feature.id(),
                    browser = browser_id,
                    "no support entry; treating as unknown"
                );
                map.insert(browser_id, None);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(map)
}

/// Serialized status for one feature and compat key, ancestors included
pub fn get_status(feature_id: &str, compat_key: &str, compat: &Compat) -> Result<Value, Error> {
    debug!(feature = feature_id, key = compat_key, "computing status");
    let selector = FeatureSelector::new([compat_key]).with_ancestors();
    let status = compute_baseline(&selector, compat)?;
    Ok(serde_json::to_value(&status).expect("status serialization is infallible"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::Browser;
    use crate::support::finder::InitialSupport;
    use rstest::rstest;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod keystone {
        use super::*;

        /// Core-set browser catalogs with one release each, dated a day
        /// apart so the keystone is decided by date
        fn browser(id: &str, day: u32, dated: bool) -> Browser {
            let release = if dated {
                json!({ "release_date": format!("2022-01-{day:02}"), "status": "current" })
            } else {
                json!({ "status": "current" })
            };
            Browser::from_data(
                id,
                serde_json::from_value(json!({
                    "name": id,
                    "releases": { "1": release },
                }))
                .unwrap(),
            )
        }

        fn full_map(ranged_browser: Option<&str>) -> SupportMap {
            let mut map = SupportMap::new();
            for (i, id) in CORE_BROWSER_SET.iter().enumerate() {
                let b = browser(id, i as u32 + 1, true);
                let release = b.release("1").unwrap().clone();
                map.insert(*id, Some(InitialSupport::new(release, Some(*id) == ranged_browser)));
            }
            map
        }

        #[test]
        fn keystone_is_the_latest_initial_support_date() {
            let keystone = keystone_date(&full_map(None)).unwrap();
            // safari_ios is seeded with the latest date
            assert_eq!(keystone.date, date(2022, 1, 7));
            assert!(!keystone.ranged);
        }

        #[test]
        fn keystone_carries_the_ranged_marker_of_the_chosen_support() {
            let keystone = keystone_date(&full_map(Some("safari_ios"))).unwrap();
            assert!(keystone.ranged);
        }

        #[test]
        fn unknown_browser_nulls_the_keystone() {
            let mut map = full_map(None);
            map.insert("firefox", None);
            assert_eq!(keystone_date(&map), None);
        }

        #[test]
        fn missing_browser_nulls_the_keystone() {
            let mut map = SupportMap::new();
            // only one of the seven queried
            let b = browser("chrome", 1, true);
            let release = b.release("1").unwrap().clone();
            map.insert("chrome", Some(InitialSupport::new(release, false)));
            assert_eq!(keystone_date(&map), None);
        }

        #[test]
        fn undated_initial_release_nulls_the_keystone() {
            let mut map = full_map(None);
            let undated = browser("edge", 1, false);
            let release = undated.release("1").unwrap().clone();
            map.insert("edge", Some(InitialSupport::new(release, false)));
            assert_eq!(keystone_date(&map), None);
        }

        #[test]
        fn exact_date_wins_a_tie_against_ranged() {
            let mut map = SupportMap::new();
            for id in CORE_BROWSER_SET {
                // every browser shipped on the same day; firefox is ranged
                let b = browser(id, 15, true);
                let release = b.release("1").unwrap().clone();
                map.insert(id, Some(InitialSupport::new(release, id == "firefox")));
            }

            let keystone = keystone_date(&map).unwrap();
            assert_eq!(keystone.date, date(2022, 1, 15));
            assert!(!keystone.ranged);
        }
    }

    mod status_mapping {
        use super::*;

        fn low(s: &str) -> Option<RangedDate> {
            Some(s.parse().unwrap())
        }

        #[test]
        fn null_keystone_is_baseline_false() {
            let status = keystone_date_to_status(None, date(2030, 1, 1), false);
            assert_eq!(status.baseline, Baseline::False);
            assert_eq!(status.baseline_low_date, None);
            assert_eq!(status.baseline_high_date, None);
        }

        #[test]
        fn discouraged_forces_baseline_false() {
            let status = keystone_date_to_status(low("2020-01-01"), date(2030, 1, 1), true);
            assert_eq!(status.baseline, Baseline::False);
            assert_eq!(status.baseline_low_date, None);
        }

        #[test]
        fn thirty_months_elapsed_upgrades_to_high() {
            let status = keystone_date_to_status(low("2020-01-15"), date(2022, 7, 15), false);
            assert_eq!(status.baseline, Baseline::High);
            assert_eq!(status.baseline_low_date, low("2020-01-15"));
            assert_eq!(status.baseline_high_date, low("2022-07-15"));
        }

        #[test]
        fn cutoff_before_thirty_months_stays_low() {
            let status = keystone_date_to_status(low("2020-01-15"), date(2022, 7, 14), false);
            assert_eq!(status.baseline, Baseline::Low);
            assert_eq!(status.baseline_low_date, low("2020-01-15"));
            assert_eq!(status.baseline_high_date, None);
        }

        #[test]
        fn ranged_keystone_keeps_its_marker_on_both_dates() {
            let status = keystone_date_to_status(low("≤2020-01-15"), date(2030, 1, 1), false);
            assert_eq!(status.baseline, Baseline::High);
            assert_eq!(status.baseline_low_date, low("≤2020-01-15"));
            assert_eq!(status.baseline_high_date, low("≤2022-07-15"));
        }

        #[rstest]
        #[case(date(2022, 1, 1))]
        #[case(date(2022, 7, 15))]
        #[case(date(2025, 1, 1))]
        fn later_cutoffs_never_downgrade(#[case] earlier: NaiveDate) {
            // monotonicity: whatever holds at `earlier` holds or upgrades later
            let keystone = low("2020-01-15");
            let at_earlier = keystone_date_to_status(keystone, earlier, false);
            let at_later =
                keystone_date_to_status(keystone, earlier + chrono::Days::new(365), false);

            if at_earlier.baseline == Baseline::High {
                assert_eq!(at_later.baseline, Baseline::High);
            }
            assert_eq!(at_earlier.baseline_low_date, at_later.baseline_low_date);
        }
    }
}
