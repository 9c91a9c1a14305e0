//! Backend-neutral cell values.
//!
//! Every driver converts its native cell type into `DbValue`, which knows the two
//! ways a cell leaves the filesystem: as raw bytes (a directory name or a
//! `#field` read) and as a JSON value (a whole-row read).

use serde_json::{Number, Value};

/// A single cell of a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl DbValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }

    /// Extract as String if the value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DbValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as i64 if the value is numeric (or numeric text).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DbValue::Integer(i) => Some(*i),
            DbValue::Real(f) => Some(*f as i64),
            DbValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Raw bytes of the cell.
    ///
    /// Text is UTF-8, numbers are decimal, blobs are verbatim and null is empty.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            DbValue::Null => Vec::new(),
            DbValue::Bool(b) => b.to_string().into_bytes(),
            DbValue::Integer(i) => i.to_string().into_bytes(),
            DbValue::Real(f) => f.to_string().into_bytes(),
            DbValue::Text(s) => s.as_bytes().to_vec(),
            DbValue::Blob(b) => b.clone(),
        }
    }

    /// JSON form of the cell. Blobs are decoded lossily; non-finite reals become null.
    pub fn to_json(&self) -> Value {
        match self {
            DbValue::Null => Value::Null,
            DbValue::Bool(b) => Value::Bool(*b),
            DbValue::Integer(i) => Value::Number((*i).into()),
            DbValue::Real(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            DbValue::Text(s) => Value::String(s.clone()),
            DbValue::Blob(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
        }
    }

    /// Get type name for debugging/error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DbValue::Null => "null",
            DbValue::Bool(_) => "bool",
            DbValue::Integer(_) => "integer",
            DbValue::Real(_) => "real",
            DbValue::Text(_) => "text",
            DbValue::Blob(_) => "blob",
        }
    }
}

impl From<&[u8]> for DbValue {
    /// Text when the bytes are UTF-8, otherwise a blob.
    fn from(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(s) => DbValue::Text(s.to_string()),
            Err(_) => DbValue::Blob(bytes.to_vec()),
        }
    }
}
