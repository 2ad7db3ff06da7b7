//! The in-memory form of one configuration file.
//!
//! A [`ConfigDocument`] is a mapping from top-level key to [`ConfigValue`].
//! Keys are kept sorted so a rewritten file is stable across runs and easy to
//! diff by hand.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{ArrayItem, ConfigValue, FromScalar, Scalar};

/// Why a piece of text is not a valid configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not JSON at all.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The text is JSON, but the root is an array, string, number, etc.
    #[error("document root is a JSON {found}, expected an object")]
    NotAnObject { found: &'static str },
}

/// A JSON object whose values are primitives or arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigDocument {
    /// Creates an empty document (`{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses file content into a document.
    ///
    /// Empty or whitespace-only text is an empty document, which is what a
    /// freshly created file looks like before anything was written to it.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Syntax`] for malformed JSON and
    /// [`DocumentError::NotAnObject`] when the root is not an object.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }

        let root: serde_json::Value = serde_json::from_str(text)?;
        match root {
            serde_json::Value::Object(_) => Ok(serde_json::from_value(root)?),
            other => Err(DocumentError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Renders the document as pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Only fails if a value cannot be represented as JSON, which the
    /// constructors of [`Scalar`] already rule out.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Returns the value at `key` if it is a primitive convertible to `T`.
    ///
    /// Missing keys, arrays, opaque values and kind mismatches all yield `None`.
    pub fn scalar<T: FromScalar>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(ConfigValue::as_scalar)
            .and_then(T::from_scalar)
    }

    /// Stores `value` under `key`, replacing whatever was there before.
    ///
    /// Returns the previous value, if any.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.remove(key)
    }

    /// Returns the array at `key`, or `None` if absent or not an array.
    pub fn array(&self, key: &str) -> Option<&[ArrayItem]> {
        self.get(key).and_then(ConfigValue::as_array)
    }

    /// The primitive elements of the array at `key`, in order.
    fn primitives<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Scalar> {
        self.array(key)
            .unwrap_or_default()
            .iter()
            .filter_map(ArrayItem::as_scalar)
    }

    /// Returns `true` if any primitive element of the array at `key` renders
    /// exactly as `target` (case-sensitive).
    pub fn array_contains(&self, key: &str, target: &str) -> bool {
        self.primitives(key).any(|item| item.to_string() == target)
    }

    /// Number of elements in the array at `key`; `0` when absent or not an array.
    pub fn array_len(&self, key: &str) -> usize {
        self.array(key).map_or(0, <[ArrayItem]>::len)
    }

    /// String representation of the element at `index`, or `None` when the
    /// array is missing, `index` is outside `[0, len)`, or the element there
    /// is not a primitive.
    pub fn array_element_at(&self, key: &str, index: usize) -> Option<String> {
        self.array(key)
            .and_then(|items| items.get(index))
            .and_then(ArrayItem::as_scalar)
            .map(Scalar::to_string)
    }

    /// String representations of every primitive element of the array at `key`.
    pub fn array_values(&self, key: &str) -> Vec<String> {
        self.primitives(key).map(Scalar::to_string).collect()
    }

    /// Appends `value` to the array at `key` unless a primitive element with
    /// the same string representation is already present.
    ///
    /// A missing key, or a key holding anything other than a JSON array, is
    /// replaced by a new empty array first.  Existing elements of an array
    /// are always kept, including non-primitive ones.
    ///
    /// Returns `true` if the value was appended.
    pub fn append_unique(&mut self, key: &str, value: Scalar) -> bool {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| ConfigValue::Array(Vec::new()));
        if !matches!(slot, ConfigValue::Array(_)) {
            *slot = ConfigValue::Array(Vec::new());
        }
        let ConfigValue::Array(items) = slot else {
            return false;
        };

        let rendered = value.to_string();
        let duplicate = items
            .iter()
            .filter_map(ArrayItem::as_scalar)
            .any(|item| item.to_string() == rendered);
        if duplicate {
            return false;
        }
        items.push(ArrayItem::Scalar(value));
        true
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
