//! Value sources consulted by the resolver.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parse_bool;

/// A value held by the project-local store.
///
/// TOML stores keep native booleans; `.properties` files only ever yield text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalValue {
    Bool(bool),
    Text(String),
}

impl LocalValue {
    /// Boolean view of the value. Text is parsed with [`parse_bool`].
    pub fn as_bool(&self) -> bool {
        match self {
            LocalValue::Bool(b) => *b,
            LocalValue::Text(s) => parse_bool(s),
        }
    }

    /// Textual view of the value.
    pub fn to_text(&self) -> String {
        match self {
            LocalValue::Bool(b) => b.to_string(),
            LocalValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for LocalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalValue::Bool(b) => write!(f, "{}", b),
            LocalValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for LocalValue {
    fn from(value: bool) -> Self {
        LocalValue::Bool(value)
    }
}

impl From<&str> for LocalValue {
    fn from(value: &str) -> Self {
        LocalValue::Text(value.to_string())
    }
}

impl From<String> for LocalValue {
    fn from(value: String) -> Self {
        LocalValue::Text(value)
    }
}

/// The higher-precedence override channel. Values are strings or absent.
pub trait OverrideSource {
    /// Look up `key` exactly.
    fn override_value(&self, key: &str) -> Option<String>;
}

/// The project-local store.
pub trait LocalSource {
    /// Look up `key`.
    fn local_value(&self, key: &str) -> Option<LocalValue>;
}

impl OverrideSource for HashMap<String, String> {
    fn override_value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl OverrideSource for BTreeMap<String, String> {
    fn override_value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl LocalSource for HashMap<String, LocalValue> {
    fn local_value(&self, key: &str) -> Option<LocalValue> {
        self.get(key).cloned()
    }
}

impl LocalSource for BTreeMap<String, LocalValue> {
    fn local_value(&self, key: &str) -> Option<LocalValue> {
        self.get(key).cloned()
    }
}

impl<T: OverrideSource + ?Sized> OverrideSource for &T {
    fn override_value(&self, key: &str) -> Option<String> {
        (**self).override_value(key)
    }
}

impl<T: LocalSource + ?Sized> LocalSource for &T {
    fn local_value(&self, key: &str) -> Option<LocalValue> {
        (**self).local_value(key)
    }
}
