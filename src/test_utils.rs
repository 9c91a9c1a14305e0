//! Shared test utilities for operation-layer and command tests.
//!
//! This module provides an in-memory SQLite database seeded with a small,
//! fixed data set, and a `DbFs` over it.

use std::sync::{Mutex, OnceLock};

use rusqlite::Connection;

use crate::cli::Settings;
use crate::codec::CodecConfig;
use crate::db::{DatabaseConfig, LazyConnection, SqliteDatabase};
use crate::fs::DbFs;
use crate::mount::MountPlan;
use crate::output::OutputFormat;
use crate::queries::dialect::EmbeddedDialect;

/// A note body that contains a newline and is longer than a filename may be.
pub const LONG_NOTE: &str = "Release checklist:\n\
    1. tag the commit, 2. build the artifacts, 3. publish the changelog, \
    4. announce on the mailing list, 5. close the milestone and open the next one.";

/// Schema and rows shared by every seeded database.
///
/// - `users`: four rows; two share `team = 'core'`, one has a null team
/// - `notes`: one short body and one body that must be content-addressed
/// - `empty`: a table with no rows
pub const SEED_SQL: &str = "
    CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, email TEXT, team TEXT);
    INSERT INTO users VALUES (1, 'Ann', 'a@example.com', 'core');
    INSERT INTO users VALUES (2, 'Bob', 'b@example.com', 'core');
    INSERT INTO users VALUES (3, 'Cid', 'c@example.com', NULL);
    INSERT INTO users VALUES (4, 'Dee', 'd@example.com', 'web');
    CREATE TABLE notes (id INTEGER, body TEXT);
    INSERT INTO notes VALUES (1, 'short note');
    CREATE TABLE empty (id INTEGER);
";

/// Create an in-memory connection holding the seed data.
pub fn seeded_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
    conn.execute_batch(SEED_SQL).expect("Failed to seed database");
    conn.execute("INSERT INTO notes VALUES (2, ?1)", [LONG_NOTE])
        .expect("Failed to insert long note");
    conn
}

/// A `DbFs` with default codec settings over a fresh seeded database.
pub fn seeded_fs() -> DbFs {
    seeded_fs_with(CodecConfig::default())
}

/// A `DbFs` over a fresh seeded database with the given codec settings.
pub fn seeded_fs_with(codec: CodecConfig) -> DbFs {
    let db = SqliteDatabase::from_connection(seeded_connection());
    DbFs::new(
        EmbeddedDialect.into(),
        codec,
        LazyConnection::from_database(Box::new(db)),
    )
}

/// A `DbFs` with default codec settings over an in-memory database built by `sql`.
pub fn fs_from_sql(sql: &str) -> DbFs {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory database");
    conn.execute_batch(sql).expect("Failed to build database");
    DbFs::new(
        EmbeddedDialect.into(),
        CodecConfig::default(),
        LazyConnection::from_database(Box::new(SqliteDatabase::from_connection(conn))),
    )
}

/// Mutex serializing tests that modify `DATABASE_URL`.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Settings for a SQLite database at `shop.db` with default codec and mount.
pub fn test_settings() -> Settings {
    let database = DatabaseConfig::from_url("shop.db");
    let mount = MountPlan::resolve(&database, None, false);
    Settings {
        database,
        codec: CodecConfig::default(),
        mount,
        format: OutputFormat::Table,
    }
}
