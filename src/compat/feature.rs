//! Feature compat records

use std::collections::HashMap;

use crate::compat::types::{CompatRecord, SupportStatement};
use crate::error::Error;

/// One feature's compat record, addressed by its dotted key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    id: String,
    deprecated: Option<bool>,
    support: HashMap<String, Vec<SupportStatement>>,
}

impl Feature {
    pub(crate) fn from_record(id: &str, record: CompatRecord) -> Self {
        let support = record
            .support
            .into_iter()
            .map(|(browser, list)| (browser, list.into_vec()))
            .collect();

        Self {
            id: id.to_string(),
            deprecated: record.status.map(|status| status.deprecated),
            support,
        }
    }

    /// The dotted compat key this record was loaded from
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `Some(true)` iff BCD marks the feature deprecated; `None` when the
    /// record carries no status block
    pub fn deprecated(&self) -> Option<bool> {
        self.deprecated
    }

    /// Raw support statements for one browser
    pub fn support_for(&self, browser_id: &str) -> Result<&[SupportStatement], Error> {
        self.support
            .get(browser_id)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingBrowserSupport {
                key: self.id.clone(),
                browser: browser_id.to_string(),
            })
    }

    pub fn has_support_for(&self, browser_id: &str) -> bool {
        self.support.contains_key(browser_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(id: &str, record: serde_json::Value) -> Feature {
        Feature::from_record(id, serde_json::from_value(record).unwrap())
    }

    #[test]
    fn support_statements_are_normalized_per_browser() {
        let feature = feature(
            "api.Foo",
            json!({
                "support": {
                    "chrome": { "version_added": "100" },
                    "firefox": [
                        { "version_added": "90" },
                        { "version_added": "80", "prefix": "-moz-" },
                    ],
                },
            }),
        );

        assert_eq!(feature.support_for("chrome").unwrap().len(), 1);
        assert_eq!(feature.support_for("firefox").unwrap().len(), 2);
    }

    #[test]
    fn missing_browser_entry_is_an_error() {
        let feature = feature(
            "api.Foo",
            json!({ "support": { "chrome": { "version_added": "100" } } }),
        );

        assert!(!feature.has_support_for("safari"));
        assert_eq!(
            feature.support_for("safari").unwrap_err(),
            Error::MissingBrowserSupport {
                key: "api.Foo".to_string(),
                browser: "safari".to_string(),
            },
        );
    }

    #[test]
    fn deprecated_reflects_the_status_block() {
        let plain = feature("api.Foo", json!({ "support": {} }));
        assert_eq!(plain.deprecated(), None);

        let kept = feature(
            "api.Foo",
            json!({ "support": {}, "status": { "deprecated": false } }),
        );
        assert_eq!(kept.deprecated(), Some(false));

        let gone = feature(
            "api.Foo",
            json!({ "support": {}, "status": { "deprecated": true } }),
        );
        assert_eq!(gone.deprecated(), Some(true));
    }
}
