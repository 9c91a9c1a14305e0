//! PostgreSQL-style information-schema dialect.
//!
//! Uses:
//! - `$n` placeholders
//! - Double-quoted identifiers
//! - Text casts on catalog and value columns, since every value arrives from a
//!   path segment and is bound as text

use super::Dialect;
use crate::db::{quote_identifier, CompiledQuery};

const SYSTEM_SCHEMAS: &str = "('pg_catalog', 'information_schema')";

/// Information-schema dialect implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InformationSchemaDialect;

impl Dialect for InformationSchemaDialect {
    fn name(&self) -> &'static str {
        "information_schema"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_identifier(name, '"')
    }

    fn list_tables(&self) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_schema NOT IN {}",
            SYSTEM_SCHEMAS
        ))
    }

    fn list_columns(&self, table: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT column_name::text FROM information_schema.columns \
             WHERE table_name = {} ORDER BY ordinal_position",
            self.placeholder(1)
        ))
        .bind(table)
    }

    fn table_exists(&self, table: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_name = {} AND table_schema NOT IN {}",
            self.placeholder(1),
            SYSTEM_SCHEMAS
        ))
        .bind(table)
    }

    fn predicate_column(&self, table: &str, column: &str) -> String {
        format!("CAST({} AS TEXT)", self.column_ref(table, column))
    }

    fn distinct_values(&self, table: &str, column: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT DISTINCT {} FROM {}",
            self.predicate_column(table, column),
            self.quote_identifier(table)
        ))
    }
}
