//! Query parameter mapping with Untappd's "omit if absent" rule.
//!
//! # Design
//! Keys are unique and kept in a `BTreeMap` so the encoded query string is
//! deterministic, which keeps request construction easy to assert on.
//! Empty string values are dropped on insert. Option structs are flattened
//! through `serde_json`: `null` and `false` are skipped, `true` becomes
//! `"true"`, numbers and strings are sent as their text.

use std::collections::BTreeMap;
use std::fmt::Display;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Everything but the RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes an id or username for use as a single path segment.
pub(crate) fn path_segment(value: impl Display) -> String {
    let value = value.to_string();
    match value.as_str() {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        other => utf8_percent_encode(other, PATH_SEGMENT).to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens a serializable option struct into parameters.
    pub fn from_options<S: Serialize>(options: &S) -> Result<Self, ApiError> {
        let mut params = Self::new();
        params.extend_from(options)?;
        Ok(params)
    }

    /// Adds every present field of `options`, overwriting existing keys.
    pub fn extend_from<S: Serialize>(&mut self, options: &S) -> Result<(), ApiError> {
        let value = serde_json::to_value(options)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(ApiError::SerializationError(format!(
                "expected an options struct, got {value}"
            )));
        };
        for (key, value) in fields {
            match value {
                Value::Null | Value::Bool(false) => {}
                Value::Bool(true) => self.insert(key, "true"),
                Value::String(text) => self.insert(key, text),
                Value::Number(number) => self.insert(key, number),
                other => {
                    return Err(ApiError::SerializationError(format!(
                        "{key} cannot be sent as a query parameter: {other}"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Inserts `key=value` unless the value renders as an empty string.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let value = value.to_string();
        if !value.is_empty() {
            self.entries.insert(key.into(), value);
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Drops every key that `other` also carries.
    pub fn remove_keys_of(&mut self, other: &QueryParams) {
        self.entries.retain(|key, _| !other.contains_key(key));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
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

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` rendering, keys in sorted order.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}
