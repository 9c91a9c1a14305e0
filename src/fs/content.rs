//! Row serialization for file content.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::db::{DbValue, QueryRows};

/// One fetched row with its column names.
#[derive(Debug, Clone, PartialEq)]
pub struct RowContent {
    headers: Vec<String>,
    values: Vec<DbValue>,
}

impl RowContent {
    /// Take the first row of a result, if there is one.
    pub fn from_rows(rows: QueryRows) -> Option<Self> {
        let QueryRows { headers, rows } = rows;
        let values = rows.into_iter().next()?;
        Some(Self { headers, values })
    }

    /// The raw bytes of `field`, or `None` when the row has no such column.
    pub fn field_bytes(&self, field: &str) -> Option<Vec<u8>> {
        self.headers
            .iter()
            .position(|header| header == field)
            .and_then(|idx| self.values.get(idx))
            .map(DbValue::to_bytes)
    }

    /// Canonical JSON: an object keyed by column name, keys sorted, pretty-printed.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        let object: BTreeMap<&str, Value> = self
            .headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(DbValue::to_json))
            .collect();
        // A map of strings to JSON values always serializes.
        serde_json::to_vec_pretty(&object).unwrap_or_default()
    }

    /// Content bytes for a read: one field when selected, otherwise the whole row.
    pub fn render(&self, field: Option<&str>) -> Option<Vec<u8>> {
        match field {
            Some(field) => self.field_bytes(field),
            None => Some(self.to_json_bytes()),
        }
    }
}

/// The `[offset, offset + length)` window of `content`, clipped to its end.
pub fn slice_window(content: &[u8], offset: u64, length: usize) -> &[u8] {
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(content.len());
    let end = start.saturating_add(length).min(content.len());
    &content[start..end]
}
