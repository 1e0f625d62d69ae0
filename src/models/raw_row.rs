//! Loosely-typed input rows.
//!
//! Leave-tracker data arrives either as header-keyed objects (API exports)
//! or as positional arrays (raw sheet ranges). [`RawRow`] wraps both so the
//! normalizer can look a field up by name or by column index.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single row as delivered by a spreadsheet or API collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(pub Value);

impl RawRow {
    /// Returns true when the row has a shape values can be read from.
    pub fn is_addressable(&self) -> bool {
        matches!(self.0, Value::Object(_) | Value::Array(_))
    }

    /// Looks up a value by header name.
    ///
    /// Null and blank values count as absent.
    pub fn named(&self, key: &str) -> Option<&Value> {
        match &self.0 {
            Value::Object(map) => map.get(key).filter(|v| is_present(v)),
            _ => None,
        }
    }

    /// Looks up a value by column index.
    ///
    /// Objects are also accepted when they carry stringified indices as keys,
    /// which is how some sheet exports encode unnamed columns.
    pub fn positional(&self, index: usize) -> Option<&Value> {
        let value = match &self.0 {
            Value::Array(cells) => cells.get(index),
            Value::Object(map) => map.get(&index.to_string()),
            _ => None,
        };
        value.filter(|v| is_present(v))
    }

    /// Describes the JSON kind of the row, for error messages.
    pub fn kind(&self) -> &'static str {
        match &self.0 {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

impl From<Value> for RawRow {
    fn from(value: Value) -> Self {
        RawRow(value)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Text access for JSON cell values.
pub trait JsonValueExt {
    /// Renders a scalar as text; `None` for null, arrays and objects.
    fn as_text(&self) -> Option<String>;
}

impl JsonValueExt for Value {
    fn as_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
