//! Request parameter set and its canonical serialization.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::{Error, Result};

/// Key the signer reserves for its own timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Request parameters, kept sorted by key.
///
/// `BTreeMap<String, _>` orders keys by byte comparison, which is exactly the
/// ordering of the canonical string; insertion order never matters.
///
/// No escaping is applied anywhere. A key or value containing `&` or `=`
/// would make the canonical string ambiguous, so [`Params::validate`] rejects
/// it and the signer refuses to sign such a set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter. Values are taken in their `Display`
    /// form; numeric formatting is the caller's business.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    /// Builder form of [`Params::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reject keys and values that cannot round-trip through the canonical string.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in &self.0 {
            if key.is_empty() {
                return Err(Error::InvalidParameter("empty parameter key".to_string()));
            }
            if has_separator(key) {
                return Err(Error::InvalidParameter(format!(
                    "key {:?} contains '&' or '='",
                    key
                )));
            }
            if has_separator(value) {
                return Err(Error::InvalidParameter(format!(
                    "value of {:?} contains '&' or '='",
                    key
                )));
            }
        }
        Ok(())
    }

    /// `key1=value1&key2=value2...` in ascending key order, no encoding.
    pub fn canonical(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn has_separator(s: &str) -> bool {
    s.contains(['&', '='])
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
