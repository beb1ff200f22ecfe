//! Request parameters and their canonical query encoding.
//!
//! Insertion order is preserved end to end: the encoded string is what gets
//! signed, so it must come out byte for byte the same every time.

use indexmap::IndexMap;
use serde_json::Value;

/// An ordered parameter mapping with unique keys.
///
/// Re-inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: IndexMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`.
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge `other` into `self`, keeping the position of keys already present.
    pub fn extend(&mut self, other: Params) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop null entries and render each value as its wire string.
    ///
    /// Arrays become compact JSON (`["BTCUSDT","ETHUSDT"]`), strings are taken
    /// verbatim, everything else uses its JSON text.
    pub fn cleaned(&self) -> Vec<(&str, String)> {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.as_str(), render_value(value)))
            .collect()
    }

    /// Canonical url-encoded query string, in insertion order.
    pub fn encode(&self) -> String {
        encode_pairs(&self.cleaned())
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn encode_pairs(pairs: &[(&str, String)]) -> String {
    // form encoding of (&str, String) pairs cannot fail
    serde_urlencoded::to_string(pairs)
        .unwrap_or_default()
        .replace("%40", "@")
}
