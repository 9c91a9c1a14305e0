//! Database access layer.
//!
//! This module provides the driver abstraction the filesystem layer queries through:
//! - Connection management (one lazily-opened connection per process)
//! - Statement execution with positional parameter binding
//! - Result rows as backend-neutral `DbValue` cells
//!
//! # Architecture
//!
//! Three drivers sit behind the `Database` trait: SQLite (`rusqlite`), PostgreSQL
//! (`postgres`) and MySQL (`mysql`, behind the `backend-mysql` feature). Each driver
//! converts its native cell type into `DbValue` so row serialization and name
//! encoding never see driver types.
//!
//! # Type Decisions
//!
//! **Why positional parameters instead of named ones?**
//! All three SQL backends bind positionally (`?`, `?1`, `$1`). The dialect decides
//! how the placeholder is spelled; the driver only sees an ordered list.
//!
//! **Why `&mut self` on `Database::query`?**
//! Both network clients require exclusive access to issue a statement, and the
//! filesystem layer is single-threaded by contract, so nothing is gained by hiding
//! the connection behind a lock.

mod backend;
mod config;
mod connection;
mod escape;
#[cfg(feature = "backend-mysql")]
mod mysql;
mod postgres;
mod sqlite;
mod value;

pub use backend::{CompiledQuery, Database, QueryParam, QueryRows};
pub use config::{redact_credentials, Backend, DatabaseConfig};
pub use connection::LazyConnection;
pub use escape::quote_identifier;
#[cfg(feature = "backend-mysql")]
pub use self::mysql::MysqlDatabase;
pub use self::postgres::PostgresDatabase;
pub use sqlite::SqliteDatabase;
pub use value::DbValue;

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{target}': {message}")]
    OpenFailed { target: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("{backend} support is not compiled into this build (enable the `backend-{backend}` feature)")]
    Unsupported { backend: &'static str },

    #[error("No database configured")]
    NotConfigured,
}
