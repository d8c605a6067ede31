//! Compat tree access
//!
//! [`Compat`] owns one parsed BCD tree and hands out cached [`Browser`]
//! and [`Feature`] objects. Caches fill lazily on first access and are
//! never evicted; repeated lookups for the same id return the same `Rc`.
//! The context expects exclusive access: computations are synchronous
//! and the caches are not synchronized.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tracing::debug;

use crate::browser::Browser;
use crate::compat::feature::Feature;
use crate::compat::types::{BrowserData, CompatRecord};
use crate::error::Error;

/// Key of the per-node compat record
const COMPAT_KEY: &str = "__compat";

/// Access context over one in-memory BCD tree
pub struct Compat {
    data: Value,
    browsers: RefCell<HashMap<String, Rc<Browser>>>,
    features: RefCell<HashMap<String, Rc<Feature>>>,
}

impl Compat {
    /// Wrap an already-parsed BCD tree
    pub fn from_value(data: Value) -> Self {
        Self {
            data,
            browsers: RefCell::new(HashMap::new()),
            features: RefCell::new(HashMap::new()),
        }
    }

    /// Walk a dotted path from the root of the tree
    pub fn query(&self, path: &str) -> Result<&Value, Error> {
        let mut node = &self.data;
        let mut walked = String::with_capacity(path.len());
        for segment in path.split('.') {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            node = node
                .get(segment)
                .ok_or_else(|| Error::InvalidPath(walked.clone()))?;
        }
        Ok(node)
    }

    /// The key itself plus each ancestor path carrying its own compat
    /// record, root-to-leaf
    ///
    /// The top-level category (`api`, `css`, ...) alone is never yielded,
    /// and the key appears only if its node carries `__compat`.
    pub fn ancestors(&self, key: &str) -> Result<Vec<String>, Error> {
        let mut node = &self.data;
        let mut walked = String::with_capacity(key.len());
        let mut keys = Vec::new();
        for (depth, segment) in key.split('.').enumerate() {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            node = node
                .get(segment)
                .ok_or_else(|| Error::InvalidPath(walked.clone()))?;
            if depth > 0 && node.get(COMPAT_KEY).is_some() {
                keys.push(walked.clone());
            }
        }
        debug!(key, expanded = keys.len(), "expanded ancestors");
        Ok(keys)
    }

    /// Cached release catalog for one BCD browser id
    pub fn browser(&self, id: &str) -> Result<Rc<Browser>, Error> {
        if let Some(browser) = self.browsers.borrow().get(id) {
            return Ok(Rc::clone(browser));
        }

        let path = format!("browsers.{id}");
        let value = self.query(&path)?;
        let data: BrowserData =
            serde_json::from_value(value.clone()).map_err(|_| Error::InvalidPath(path))?;
        let browser = Rc::new(Browser::from_data(id, data));

        self.browsers
            .borrow_mut()
            .insert(id.to_string(), Rc::clone(&browser));
        Ok(browser)
    }

    /// Cached feature record for one compat key
    pub fn feature(&self, key: &str) -> Result<Rc<Feature>, Error> {
        if let Some(feature) = self.features.borrow().get(key) {
            return Ok(Rc::clone(feature));
        }

        let node = self.query(key)?;
        let record = node
            .get(COMPAT_KEY)
            .ok_or_else(|| Error::MissingCompatRecord(key.to_string()))?;
        let record: CompatRecord = serde_json::from_value(record.clone())
            .map_err(|_| Error::MissingCompatRecord(key.to_string()))?;
        let feature = Rc::new(Feature::from_record(key, record));

        self.features
            .borrow_mut()
            .insert(key.to_string(), Rc::clone(&feature));
        Ok(feature)
    }

    /// Cutoff clock: the UTC calendar date of `__meta.timestamp`
    pub fn cutoff_date(&self) -> Result<NaiveDate, Error> {
        let invalid = || Error::InvalidPath("__meta.timestamp".to_string());
        let value = self.query("__meta.timestamp")?;
        let raw = value.as_str().ok_or_else(invalid)?;
        let instant = DateTime::parse_from_rfc3339(raw).map_err(|_| invalid())?;
        Ok(instant.naive_utc().date())
    }
}
