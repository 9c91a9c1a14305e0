//! MySQL-style catalog dialect.
//!
//! Metadata comes from `information_schema`, filtered by the configured database
//! name. When the connection string names no database, the filter falls back to
//! the session's current database via `DATABASE()`.
//!
//! Uses:
//! - `?` placeholders
//! - Backtick-quoted identifiers

use super::Dialect;
use crate::db::{quote_identifier, CompiledQuery};

/// Catalog-table dialect implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDialect {
    database: Option<String>,
}

impl CatalogDialect {
    pub fn new(database: Option<String>) -> Self {
        Self { database }
    }

    /// Append the `table_schema` filter to `sql`, binding the database name when known.
    fn scoped(&self, sql: &str) -> CompiledQuery {
        match &self.database {
            Some(database) => CompiledQuery::new(format!("{} table_schema = ?", sql))
                .bind(database.as_str()),
            None => CompiledQuery::new(format!("{} table_schema = DATABASE()", sql)),
        }
    }
}

impl Dialect for CatalogDialect {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_identifier(name, '`')
    }

    fn list_tables(&self) -> CompiledQuery {
        self.scoped("SELECT table_name FROM information_schema.tables WHERE")
    }

    fn list_columns(&self, table: &str) -> CompiledQuery {
        let mut query =
            CompiledQuery::new("SELECT column_name FROM information_schema.columns WHERE table_name = ?")
                .bind(table);
        let scope = self.scoped(" AND");
        query.sql.push_str(&scope.sql);
        query.params.extend(scope.params);
        query.sql.push_str(" ORDER BY ordinal_position");
        query
    }

    fn table_exists(&self, table: &str) -> CompiledQuery {
        let mut query =
            CompiledQuery::new("SELECT table_name FROM information_schema.tables WHERE table_name = ?")
                .bind(table);
        let scope = self.scoped(" AND");
        query.sql.push_str(&scope.sql);
        query.params.extend(scope.params);
        query
    }
}
