//! Path grammar.
//!
//! ```text
//! /                                       -> tables
//! /<table>                                -> columns
//! /<table>/<column>                       -> distinct values
//! /<table>/<column>/<value>[#<field>]     -> one row, or a directory of indices
//! /<table>/<column>/<value>/<n>[#<field>] -> the n-th matching row
//! ```
//!
//! Resolution is purely syntactic: it never touches the database, and the
//! `value` segment is kept in its encoded form for the caller to decode.

use serde::Serialize;
use thiserror::Error;

/// Segments starting with this prefix are reserved at the top level.
pub const RESERVED_PREFIX: char = '.';

const MAX_DEPTH: usize = 4;

/// Resolution errors. All of them surface as "not found".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("path has {depth} segments, at most 4 are allowed")]
    TooDeep { depth: usize },

    #[error("'{segment}' is a reserved name")]
    ReservedName { segment: String },

    #[error("'{segment}' is not a row index")]
    InvalidOffset { segment: String },
}

/// Semantic address of a path, determined by its segment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathAddress {
    Root,
    Table {
        table: String,
    },
    Column {
        table: String,
        column: String,
    },
    ValueGroup {
        table: String,
        column: String,
        value: String,
        field: Option<String>,
    },
    Row {
        table: String,
        column: String,
        value: String,
        offset: u64,
        field: Option<String>,
    },
}

impl PathAddress {
    /// Number of segments in the address.
    pub fn depth(&self) -> usize {
        match self {
            PathAddress::Root => 0,
            PathAddress::Table { .. } => 1,
            PathAddress::Column { .. } => 2,
            PathAddress::ValueGroup { .. } => 3,
            PathAddress::Row { .. } => 4,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PathAddress::Root => "root",
            PathAddress::Table { .. } => "table",
            PathAddress::Column { .. } => "column",
            PathAddress::ValueGroup { .. } => "value_group",
            PathAddress::Row { .. } => "row",
        }
    }

    /// The field selector, for addresses that carry one.
    pub fn field(&self) -> Option<&str> {
        match self {
            PathAddress::ValueGroup { field, .. } | PathAddress::Row { field, .. } => {
                field.as_deref()
            }
            _ => None,
        }
    }
}

/// Resolve a slash-separated path into an address.
pub fn resolve(path: &str) -> Result<PathAddress, ResolveError> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if let Some(first) = segments.first() {
        if first.starts_with(RESERVED_PREFIX) {
            return Err(ResolveError::ReservedName {
                segment: first.to_string(),
            });
        }
    }

    match segments.as_slice() {
        [] => Ok(PathAddress::Root),
        [table] => Ok(PathAddress::Table {
            table: table.to_string(),
        }),
        [table, column] => Ok(PathAddress::Column {
            table: table.to_string(),
            column: column.to_string(),
        }),
        [table, column, last] => {
            let (value, field) = split_field(last);
            Ok(PathAddress::ValueGroup {
                table: table.to_string(),
                column: column.to_string(),
                value: value.to_string(),
                field,
            })
        }
        [table, column, value, last] => {
            let (index, field) = split_field(last);
            let offset = index
                .parse::<u64>()
                .map_err(|_| ResolveError::InvalidOffset {
                    segment: last.to_string(),
                })?;
            Ok(PathAddress::Row {
                table: table.to_string(),
                column: column.to_string(),
                value: value.to_string(),
                offset,
                field,
            })
        }
        _ => Err(ResolveError::TooDeep {
            depth: segments.len(),
        }),
    }
}

/// Split `name#field` at the last `#`. An empty field leaves the segment whole.
fn split_field(segment: &str) -> (&str, Option<String>) {
    match segment.rsplit_once('#') {
        Some((name, field)) if !field.is_empty() => (name, Some(field.to_string())),
        _ => (segment, None),
    }
}
