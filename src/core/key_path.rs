//! Dotted key paths into serialized items.
//!
//! Search items are generic, so fields are reached by serializing an item
//! into a [`serde_json::Value`] tree and walking it. `"name"`,
//! `"item.name"` and `"aliases.0"` are all valid paths; numeric segments
//! index into arrays.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ExpatError, ExpatResult};

/// A parsed, non-empty key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a dotted path. Blank segments are dropped; a path with no
    /// segments at all is a configuration error.
    pub fn parse(raw: &str) -> ExpatResult<Self> {
        let segments: Vec<String> = raw
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if segments.is_empty() {
            return Err(ExpatError::EmptyKeyPath);
        }

        Ok(Self {
            raw: raw.trim().to_string(),
            segments,
        })
    }

    /// Parse several paths at once, failing on the first bad one.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> ExpatResult<Vec<Self>> {
        raw.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    /// The path as it was configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Walk the path. Returns `None` when any segment is missing.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            })
    }

    /// Resolve to a string or fail with a configuration error naming this path.
    pub fn string_in<'a>(&self, value: &'a Value) -> ExpatResult<&'a str> {
        match self.resolve(value) {
            Some(Value::String(s)) => Ok(s),
            other => Err(ExpatError::KeyNotString {
                key_path: self.raw.clone(),
                found: value_kind(other),
            }),
        }
    }

    /// Every string reachable at this path: the value itself when it is a
    /// string, or each string element when it is an array. Anything else
    /// yields nothing.
    pub fn strings_in<'a>(&self, value: &'a Value) -> Vec<&'a str> {
        match self.resolve(value) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl FromStr for KeyPath {
    type Err = ExpatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Human-readable kind of a resolved value, used in error messages.
pub fn value_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Serialize an item into the value tree key paths walk over.
pub fn to_value<T: Serialize>(item: &T) -> ExpatResult<Value> {
    Ok(serde_json::to_value(item)?)
}
