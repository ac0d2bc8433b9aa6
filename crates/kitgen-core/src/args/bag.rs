//! Shared argument/data bag threaded through a run

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved key under which positional tokens are exposed
pub const POSITIONAL_KEY: &str = "_";

/// A single value held in the bag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl Value {
    /// Truthiness used by `when` conditions and boolean lookups
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// Flags, answers and static generator data accumulated over one invocation.
///
/// The bag only grows: values can be overwritten (last write wins) but never
/// removed. Positional tokens live under [`POSITIONAL_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBag {
    values: BTreeMap<String, Value>,
    positionals: Vec<String>,
}

impl ArgumentBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether `key` already holds a value (the positional key always does)
    pub fn contains(&self, key: &str) -> bool {
        key == POSITIONAL_KEY || self.values.contains_key(key)
    }

    /// Insert a value, overwriting any previous one under the same key.
    /// A list written to the positional key is appended to the positionals.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if key == POSITIONAL_KEY {
            match value {
                Value::List(items) => self.positionals.extend(items),
                Value::String(s) => self.positionals.push(s),
                Value::Bool(_) => {}
            }
            return;
        }
        self.values.insert(key, value);
    }

    /// Merge key/value pairs in iteration order, later pairs winning
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Boolean lookup; missing keys are false
    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(Value::is_truthy)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn push_positionals<I: IntoIterator<Item = String>>(&mut self, tokens: I) {
        self.positionals.extend(tokens);
    }

    pub fn is_silent(&self) -> bool {
        self.flag("silent")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.positionals.is_empty()
    }

    /// JSON view handed to the rendering engine
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.values {
            map.insert(key.clone(), value.to_json());
        }
        map.insert(
            POSITIONAL_KEY.to_string(),
            Value::List(self.positionals.clone()).to_json(),
        );
        serde_json::Value::Object(map)
    }
}
