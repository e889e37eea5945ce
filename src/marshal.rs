//! Entry point which turns a flat entry mapping into JSON bytes.

use crate::error::{JpathError, Result};
use crate::tree::{Limits, TreeBuilder};
use crate::value::FlatValue;
use serde_json::Value;

/// Assembles flat entries into a nested JSON document.
///
/// Holds only configuration, so one instance can be shared and reused. Each
/// call builds and discards its own tree.
#[derive(Debug, Default, Clone)]
pub struct Marshaller {
    limits: Limits,
    pretty: bool,
}

impl Marshaller {
    pub fn builder() -> MarshallerBuilder {
        MarshallerBuilder::default()
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Builds the nested document from `entries`.
    ///
    /// The first malformed key, failed coercion or structural conflict aborts
    /// the build and is returned.
    pub fn to_value<I, K, V>(&self, entries: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FlatValue>,
    {
        let mut tree = TreeBuilder::new(self.limits);
        for (key, value) in entries {
            let key = key.as_ref();
            if let Err(e) = tree.insert(key, value.into()) {
                tracing::debug!(path = key, error = %e, "rejected flat entry");
                return Err(e);
            }
        }

        tracing::debug!(entries = tree.len(), "assembled composite tree");
        Ok(tree.finish())
    }

    /// Builds the nested document from `entries` and encodes it as JSON.
    /// Object members are ordered by key.
    pub fn marshal<I, K, V>(&self, entries: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FlatValue>,
    {
        let document = self.to_value(entries)?;
        self.encode(&document)
    }

    /// Like [`Marshaller::marshal`], for flat entries held in a JSON object.
    ///
    /// # Errors
    /// Returns [`JpathError::InputNotAnObject`] unless `input` is an object,
    /// and [`JpathError::UnsupportedValue`] for a `null` or array entry.
    pub fn marshal_json(&self, input: Value) -> Result<Vec<u8>> {
        let map = match input {
            Value::Object(map) => map,
            other => {
                return Err(JpathError::InputNotAnObject {
                    found: json_kind(&other).to_string(),
                })
            }
        };

        let entries = map
            .into_iter()
            .map(|(key, value)| FlatValue::from_json(&key, value).map(|value| (key, value)))
            .collect::<Result<Vec<_>>>()?;

        self.marshal(entries)
    }

    fn encode(&self, document: &Value) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        Ok(bytes)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Configures a [`Marshaller`].
#[derive(Debug, Default, Clone)]
pub struct MarshallerBuilder {
    marshaller: Marshaller,
}

impl MarshallerBuilder {
    /// Largest array index a key may use. Larger indices are rejected before
    /// any array grows.
    pub fn max_index(mut self, max_index: usize) -> Self {
        self.marshaller.limits.max_index = max_index;
        self
    }

    /// Most segments a key may have. Deeper keys are rejected before the
    /// tree is touched.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.marshaller.limits.max_depth = max_depth;
        self
    }

    /// Most array slots, `null` placeholders included, one document may
    /// allocate across all of its keys.
    pub fn max_slots(mut self, max_slots: usize) -> Self {
        self.marshaller.limits.max_slots = max_slots;
        self
    }

    /// Indent the encoded output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.marshaller.pretty = pretty;
        self
    }

    pub fn build(self) -> Marshaller {
        self.marshaller
    }
}
