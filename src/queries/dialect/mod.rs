//! Backend-specific statement construction.
//!
//! Each backend spells metadata lookups, placeholders, and identifier quoting
//! differently. The `Dialect` trait encapsulates those differences; the
//! `SqlDialect` enum is chosen once from the database configuration and
//! dispatches statically through `enum_dispatch`.
//!
//! Identifiers (table and column names) cannot be bound as parameters, so they
//! are quoted and interpolated. Values are always bound.

mod catalog;
mod embedded;
mod information_schema;

pub use catalog::CatalogDialect;
pub use embedded::EmbeddedDialect;
pub use information_schema::InformationSchemaDialect;

use enum_dispatch::enum_dispatch;

use crate::db::{CompiledQuery, QueryParam, QueryRows};

/// Trait for backend-specific statement construction.
#[enum_dispatch]
pub trait Dialect {
    /// Short name used in logs and `info` output.
    fn name(&self) -> &'static str;

    /// Placeholder for the 1-based parameter `index`.
    ///
    /// For example:
    /// - Catalog: `placeholder(1)` -> `"?"`
    /// - InformationSchema: `placeholder(1)` -> `"$1"`
    /// - Embedded: `placeholder(1)` -> `"?1"`
    fn placeholder(&self, index: usize) -> String;

    /// Quote a table or column name.
    fn quote_identifier(&self, name: &str) -> String;

    /// Statement listing user tables, one name per row in the first column.
    fn list_tables(&self) -> CompiledQuery;

    /// Statement whose result `column_names` turns into the columns of `table`.
    fn list_columns(&self, table: &str) -> CompiledQuery;

    /// Statement returning at least one row iff `table` exists.
    fn table_exists(&self, table: &str) -> CompiledQuery;

    /// Extract column names from the result of `list_columns`.
    fn column_names(&self, rows: &QueryRows) -> Vec<String> {
        rows.first_column()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect()
    }

    /// Reference to `column` of `table` in a select list or predicate.
    fn column_ref(&self, _table: &str, column: &str) -> String {
        self.quote_identifier(column)
    }

    /// Left-hand side of a `column = value` predicate.
    fn predicate_column(&self, table: &str, column: &str) -> String {
        self.column_ref(table, column)
    }

    /// `column = value` with the value bound as the first parameter.
    fn value_predicate(&self, table: &str, column: &str) -> String {
        format!("{} = {}", self.predicate_column(table, column), self.placeholder(1))
    }

    /// Distinct values of `column`; nulls are dropped by the caller.
    fn distinct_values(&self, table: &str, column: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT DISTINCT {} FROM {}",
            self.column_ref(table, column),
            self.quote_identifier(table)
        ))
    }

    /// The row at `offset` among those where `column` equals `value`.
    fn row_at(&self, table: &str, column: &str, value: &[u8], offset: u64) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT * FROM {} WHERE {} LIMIT 1 OFFSET {}",
            self.quote_identifier(table),
            self.value_predicate(table, column),
            offset
        ))
        .bind(QueryParam::from_bytes(value))
    }

    /// Number of rows where `column` equals `value`.
    fn count_matching(&self, table: &str, column: &str, value: &[u8]) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            self.quote_identifier(table),
            self.value_predicate(table, column)
        ))
        .bind(QueryParam::from_bytes(value))
    }

    /// Statement returning a row iff `column` exists in `table` and the table is non-empty.
    fn column_probe(&self, table: &str, column: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT {} FROM {} LIMIT 1",
            self.column_ref(table, column),
            self.quote_identifier(table)
        ))
    }
}

/// The dialect in use, selected once at startup.
#[enum_dispatch(Dialect)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlDialect {
    Catalog(CatalogDialect),
    InformationSchema(InformationSchemaDialect),
    Embedded(EmbeddedDialect),
}
