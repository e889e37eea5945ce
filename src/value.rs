//! Defines the raw values of flat entries.

use crate::error::JpathError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;

/// The raw value of a flat entry, before any directive is applied.
///
/// Flat input is heterogeneous, but it is never arbitrary JSON: a `null` or
/// an array is not a valid raw value. A [`FlatValue::Nested`] mapping is
/// taken verbatim and its keys are not interpreted as paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// Boolean value
    Bool(bool),
    /// Integer or floating point value
    Number(Number),
    /// String (UTF-8) value
    String(String),
    /// An already nested object, inserted as an opaque subtree
    Nested(Map<String, Value>),
}

impl FlatValue {
    /// Short label of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FlatValue::Bool(_) => "boolean",
            FlatValue::Number(_) => "number",
            FlatValue::String(_) => "string",
            FlatValue::Nested(_) => "object",
        }
    }

    /// Converts a JSON value into a raw flat value.
    ///
    /// # Errors
    /// Returns [`JpathError::UnsupportedValue`] for `null` and arrays.
    pub fn from_json(key: &str, value: Value) -> Result<Self, JpathError> {
        match value {
            Value::Bool(b) => Ok(FlatValue::Bool(b)),
            Value::Number(n) => Ok(FlatValue::Number(n)),
            Value::String(s) => Ok(FlatValue::String(s)),
            Value::Object(map) => Ok(FlatValue::Nested(map)),
            Value::Null => Err(unsupported(key, "null")),
            Value::Array(_) => Err(unsupported(key, "array")),
        }
    }

    /// Converts the raw value into JSON unchanged.
    pub fn into_json(self) -> Value {
        match self {
            FlatValue::Bool(b) => Value::Bool(b),
            FlatValue::Number(n) => Value::Number(n),
            FlatValue::String(s) => Value::String(s),
            FlatValue::Nested(map) => Value::Object(map),
        }
    }
}

fn unsupported(key: &str, found: &str) -> JpathError {
    JpathError::UnsupportedValue {
        path: key.to_string(),
        found: found.to_string(),
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Bool(value) => write!(f, "{}", value),
            FlatValue::Number(value) => write!(f, "{}", value),
            FlatValue::String(value) => write!(f, "{:?}", value),
            FlatValue::Nested(map) => write!(f, "{}", Value::Object(map.clone())),
        }
    }
}

impl TryFrom<Value> for FlatValue {
    type Error = JpathError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        FlatValue::from_json("<value>", value)
    }
}

impl From<bool> for FlatValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FlatValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for FlatValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<i32> for FlatValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for FlatValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for FlatValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<usize> for FlatValue {
    fn from(value: usize) -> Self {
        Self::Number(value.into())
    }
}

/// JSON has no representation for `NaN` or infinities, so a non-finite
/// float becomes its text form (`"NaN"`, `"inf"`, `"-inf"`). Under `num()`
/// that text is then rejected as not a number.
impl From<f64> for FlatValue {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => Self::Number(n),
            None => Self::String(value.to_string()),
        }
    }
}

impl From<u64> for FlatValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Number> for FlatValue {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Map<String, Value>> for FlatValue {
    fn from(value: Map<String, Value>) -> Self {
        Self::Nested(value)
    }
}

/// Ergonomic builder pattern API for creating a flat entry mapping.
///
/// Keys are unique: adding the same key twice keeps the last value, as a
/// mapping would.
#[derive(Debug, Default, Clone)]
pub struct EntriesBuilder {
    entries: BTreeMap<String, FlatValue>,
}

impl EntriesBuilder {
    /// Add a flat key, raw value pair.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<FlatValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Add a pre-nested object, built from name, JSON value pairs.
    pub fn nested(
        self,
        key: impl Into<String>,
        fields: impl IntoIterator<Item = (impl Into<String>, Value)>,
    ) -> Self {
        let map = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect::<Map<_, _>>();
        self.entry(key, map)
    }

    /// Consumes the builder and returns the flat mapping
    pub fn build(self) -> BTreeMap<String, FlatValue> {
        self.entries
    }
}
