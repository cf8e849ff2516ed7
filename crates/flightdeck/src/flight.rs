//! Core flight record types for flightdeck.
//!
//! A [`Flight`] is an open-ended JSON object. The store only ever looks at its
//! `id` field, and only through a [`FlightId`] parsed from a request path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Name of the field flights are looked up by.
pub const ID_FIELD: &str = "id";

/// An identifier parsed leniently from a path segment.
///
/// Parsing reads an optional sign and the leading run of digits and ignores
/// whatever follows, so `"12abc"` is 12 and `"3.9"` is 3. A `0x` prefix reads
/// hexadecimal digits. Input with no leading digits produces a sentinel that
/// equals no stored id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightId(Option<f64>);

impl FlightId {
    /// The identifier that matches nothing.
    pub const NONE: Self = Self(None);

    /// Parse a path segment into an identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (radix, digits) = match unsigned.get(..2) {
            Some("0x" | "0X") => (16, &unsigned[2..]),
            _ => (10, unsigned),
        };

        let end = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        let digits = &digits[..end];
        if digits.is_empty() {
            return Self::NONE;
        }

        let magnitude = if radix == 10 {
            // A run of ASCII digits always parses as f64
            digits.parse::<f64>().unwrap_or(f64::NAN)
        } else {
            digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
        };

        if magnitude.is_nan() {
            Self::NONE
        } else if negative {
            Self(Some(-magnitude))
        } else {
            Self(Some(magnitude))
        }
    }

    /// Create an identifier from an integer.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_i64(id: i64) -> Self {
        Self(Some(id as f64))
    }

    /// The numeric value, or `None` for the sentinel.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.0
    }

    /// Check whether a stored `id` value equals this identifier.
    ///
    /// Only JSON numbers can match; `"5"` never equals `5`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, value: &Value) -> bool {
        match (self.0, value.as_f64()) {
            (Some(id), Some(stored)) => id == stored,
            _ => false,
        }
    }
}

impl std::fmt::Display for FlightId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "NaN"),
        }
    }
}

impl From<&str> for FlightId {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// A single flight record.
///
/// Fields are kept in the order they were first written. Apart from `id`,
/// their names and values mean nothing to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flight(Map<String, Value>);

impl Flight {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The record's `id` field, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_FIELD)
    }

    /// Check whether this record is addressed by `id`.
    #[must_use]
    pub fn has_id(&self, id: FlightId) -> bool {
        self.id().is_some_and(|value| id.matches(value))
    }

    /// Get a field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Shallow-merge `patch` into this record.
    ///
    /// Every key in the patch overwrites the existing value, `id` included.
    /// Keys absent from the patch are left alone.
    pub fn merge(&mut self, patch: Flight) {
        for (key, value) in patch.0 {
            self.0.insert(key, value);
        }
    }

    /// Number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record and return the underlying map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Flight {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Flight {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::invalid_body(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
