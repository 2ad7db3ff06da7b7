//! Tagged JSON value types stored in a [`ConfigDocument`](super::document::ConfigDocument).
//!
//! Only two shapes are supported at the top level of a document:
//!
//! - a single primitive ([`Scalar`]): string, number or boolean;
//! - an array, whose primitive elements are what accessors see.
//!
//! Anything else found in a file (null, nested objects) is kept verbatim as
//! [`ConfigValue::Opaque`] so that rewriting the document does not lose it,
//! but no accessor will ever return it.  Non-primitive array elements are
//! likewise kept as [`ArrayItem::Other`].
//!
//! # How the JSON mapping works (for beginners)
//!
//! `#[serde(untagged)]` tells serde to try each enum variant in order until
//! one deserializes successfully.  For [`Scalar`] that means `true` becomes
//! `Bool`, `75` becomes `Number`, and `"alice"` becomes `String`.  Serializing
//! writes the inner value with no wrapper, so the file stays plain JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A JSON primitive: string, number, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    /// Integers and floats are kept exactly as written.
    Number(Number),
    String(String),
}

impl Scalar {
    /// Builds a number scalar from a float.
    ///
    /// Returns `None` for NaN and infinities, which JSON cannot represent.
    pub fn float(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Scalar::Number)
    }

    /// Interprets free-form text the way a user typing at a prompt would mean it.
    ///
    /// `true` / `false` become booleans, integer and finite float literals
    /// become numbers, and everything else stays a string.
    pub fn infer(text: &str) -> Self {
        match text {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            _ => {}
        }
        if let Ok(n) = text.parse::<i64>() {
            return Scalar::Number(n.into());
        }
        if let Ok(n) = text.parse::<u64>() {
            return Scalar::Number(n.into());
        }
        if let Ok(f) = text.parse::<f64>() {
            if let Some(number) = Number::from_f64(f) {
                return Scalar::Number(number);
            }
        }
        Scalar::String(text.to_string())
    }

    /// Short name of the JSON kind, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::String(_) => "string",
        }
    }
}

/// The string representation used when scanning arrays.
///
/// Strings render without quotes, so `"alice"` and `alice` compare equal.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(value.into())
    }
}

// ── Typed extraction ──────────────────────────────────────────────────────────

/// Rust types that can be read back out of a [`Scalar`].
///
/// Extraction is strict: a string `"75"` is *not* an integer, and a number
/// `1` is *not* a boolean.  A kind mismatch yields `None`, which the store
/// turns into the caller's default.
pub trait FromScalar: Sized {
    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

impl FromScalar for String {
    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromScalar for i64 {
    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Number(n) => n.as_i64(),
            _ => None,
        }
    }
}

impl FromScalar for i32 {
    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        i64::from_scalar(scalar).and_then(|n| i32::try_from(n).ok())
    }
}

impl FromScalar for f64 {
    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl FromScalar for bool {
    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromScalar for Scalar {
    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        Some(scalar.clone())
    }
}

// ── Top-level values ──────────────────────────────────────────────────────────

/// One element of a top-level array.
///
/// Arrays are classified by their JSON shape alone, so an array may mix
/// primitives with elements outside the supported model.  Those are kept
/// as [`ArrayItem::Other`] and skipped by every scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrayItem {
    Scalar(Scalar),
    Other(serde_json::Value),
}

impl ArrayItem {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ArrayItem::Scalar(s) => Some(s),
            ArrayItem::Other(_) => None,
        }
    }
}

impl From<Scalar> for ArrayItem {
    fn from(value: Scalar) -> Self {
        ArrayItem::Scalar(value)
    }
}

/// A value stored directly under a top-level document key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    /// Any JSON array, whatever its elements.
    Array(Vec<ArrayItem>),
    /// Any JSON outside the supported model, preserved but never interpreted.
    Opaque(serde_json::Value),
}

impl ConfigValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ArrayItem]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Scalar> for ConfigValue {
    fn from(value: Scalar) -> Self {
        ConfigValue::Scalar(value)
    }
}

impl From<Vec<Scalar>> for ConfigValue {
    fn from(value: Vec<Scalar>) -> Self {
        ConfigValue::Array(value.into_iter().map(ArrayItem::Scalar).collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
