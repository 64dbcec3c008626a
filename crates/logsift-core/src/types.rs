//! Core types for logsift-core.
//!
//! A raw [`Hit`] stays an opaque JSON value: producers disagree on almost
//! every part of the envelope, so the extractor probes it with `get` rather
//! than deserializing into a fixed struct. The output unit is the flat
//! [`Record`].

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One raw search hit (`_id`, `_index`, `_source`, …) as returned by the
/// source collaborator.
pub type Hit = Value;

/// A normalised, flat record produced from one [`Hit`].
///
/// Keys are lower-case. Known dictionary fields appear only when some source
/// key resolved to them; nothing is padded with sentinels at this stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under the lower-cased form of `key`, replacing any
    /// previous value.
    pub fn insert(&mut self, key: impl AsRef<str>, value: Value) {
        self.0.insert(key.as_ref().to_lowercase(), value);
    }

    /// Insert only if no value is stored under `key` yet. Returns whether the
    /// value was stored.
    pub fn insert_if_absent(&mut self, key: impl AsRef<str>, value: Value) -> bool {
        let key = key.as_ref().to_lowercase();
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String view of a field, `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
