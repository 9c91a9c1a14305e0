//! SQLite backend implementation.
//!
//! Wraps a `rusqlite::Connection` opened read-only; the filesystem never writes.

use std::path::Path;

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags};

use super::backend::{CompiledQuery, Database, QueryParam, QueryRows};
use super::value::DbValue;
use super::DbError;

/// SQLite database wrapper implementing the `Database` trait.
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| DbError::OpenFailed {
            target: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::OpenFailed {
            target: ":memory:".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection (used to seed fixtures before handing over).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

fn query_failed(e: rusqlite::Error) -> DbError {
    DbError::QueryFailed {
        message: e.to_string(),
    }
}

fn convert_param(param: &QueryParam) -> Value {
    match param {
        QueryParam::Text(s) => Value::Text(s.clone()),
        QueryParam::Bytes(b) => Value::Blob(b.clone()),
    }
}

fn convert_value(value: ValueRef<'_>) -> DbValue {
    match value {
        ValueRef::Null => DbValue::Null,
        ValueRef::Integer(i) => DbValue::Integer(i),
        ValueRef::Real(f) => DbValue::Real(f),
        ValueRef::Text(bytes) => DbValue::from(bytes),
        ValueRef::Blob(bytes) => DbValue::Blob(bytes.to_vec()),
    }
}

impl Database for SqliteDatabase {
    fn query(&mut self, query: &CompiledQuery) -> Result<QueryRows, DbError> {
        let mut stmt = self.conn.prepare(&query.sql).map_err(query_failed)?;
        let headers: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = headers.len();

        let params = params_from_iter(query.params.iter().map(convert_param));
        let mut rows = stmt.query(params).map_err(query_failed)?;

        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(query_failed)? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(convert_value(row.get_ref(idx).map_err(query_failed)?));
            }
            result.push(values);
        }

        Ok(QueryRows {
            headers,
            rows: result,
        })
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
