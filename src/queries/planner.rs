//! Address-to-statement planning.
//!
//! The planner pairs each address kind with the statement a filesystem
//! operation needs: an attribute probe, a listing, or the row to serialize.
//! Every segment taken from a path is decoded through the codec first: values
//! before being bound, table and column names before being quoted.

use std::borrow::Cow;

use super::dialect::{Dialect, SqlDialect};
use crate::codec::ContentCodec;
use crate::db::CompiledQuery;
use crate::path::PathAddress;

/// Builds parameterized statements for path addresses.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    dialect: SqlDialect,
}

impl QueryPlanner {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &SqlDialect {
        &self.dialect
    }

    /// Statement whose result decides the address's attributes.
    ///
    /// - `Table`: a row iff the table exists
    /// - `Column`: a row iff the column yields at least one row
    /// - `ValueGroup`: the match count
    /// - `Row`: the row itself
    ///
    /// `Root` needs no statement.
    pub fn attribute_query(&self, addr: &PathAddress, codec: &ContentCodec) -> Option<CompiledQuery> {
        match addr {
            PathAddress::Root => None,
            PathAddress::Table { table } => Some(self.dialect.table_exists(&name(codec, table))),
            PathAddress::Column { table, column } => Some(
                self.dialect
                    .column_probe(&name(codec, table), &name(codec, column)),
            ),
            PathAddress::ValueGroup {
                table,
                column,
                value,
                ..
            } => Some(self.dialect.count_matching(
                &name(codec, table),
                &name(codec, column),
                codec.decode(value),
            )),
            PathAddress::Row {
                table,
                column,
                value,
                offset,
                ..
            } => Some(self.dialect.row_at(
                &name(codec, table),
                &name(codec, column),
                codec.decode(value),
                *offset,
            )),
        }
    }

    /// Statement whose result lists the address's children.
    ///
    /// A `ValueGroup` lists indices, so its statement is the match count. A
    /// `Row` has no children.
    pub fn listing_query(&self, addr: &PathAddress, codec: &ContentCodec) -> Option<CompiledQuery> {
        match addr {
            PathAddress::Root => Some(self.dialect.list_tables()),
            PathAddress::Table { table } => Some(self.dialect.list_columns(&name(codec, table))),
            PathAddress::Column { table, column } => Some(
                self.dialect
                    .distinct_values(&name(codec, table), &name(codec, column)),
            ),
            PathAddress::ValueGroup { .. } => self.attribute_query(addr, codec),
            PathAddress::Row { .. } => None,
        }
    }

    /// Statement fetching the row whose content a read returns.
    ///
    /// A `ValueGroup` reads its first match; the caller has already checked
    /// there is exactly one.
    pub fn row_query(&self, addr: &PathAddress, codec: &ContentCodec) -> Option<CompiledQuery> {
        match addr {
            PathAddress::ValueGroup {
                table,
                column,
                value,
                ..
            } => Some(self.dialect.row_at(
                &name(codec, table),
                &name(codec, column),
                codec.decode(value),
                0,
            )),
            PathAddress::Row { .. } => self.attribute_query(addr, codec),
            _ => None,
        }
    }
}

/// Decode a table or column segment. Identifiers are text, so lossy decoding only
/// affects names that never came from the database.
fn name<'a>(codec: &'a ContentCodec, segment: &'a str) -> Cow<'a, str> {
    String::from_utf8_lossy(codec.decode(segment))
}
