//! Database connection management.

use tracing::{debug, info};

use super::backend::{CompiledQuery, Database, QueryRows};
use super::config::DatabaseConfig;
use super::DbError;

/// A single database connection, opened on first use and held afterwards.
///
/// There is no pool: the filesystem layer issues one statement at a time, and
/// the connection is only as concurrent as its owner.
pub struct LazyConnection {
    config: Option<DatabaseConfig>,
    db: Option<Box<dyn Database>>,
}

impl LazyConnection {
    /// A connection that opens `config` the first time it is queried.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config: Some(config),
            db: None,
        }
    }

    /// Wrap an already-open driver.
    pub fn from_database(db: Box<dyn Database>) -> Self {
        Self {
            config: None,
            db: Some(db),
        }
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    /// Execute a statement, opening the connection first if needed.
    ///
    /// A failed open is not remembered; the next call tries again.
    pub fn query(&mut self, query: &CompiledQuery) -> Result<QueryRows, DbError> {
        if self.db.is_none() {
            let config = self.config.as_ref().ok_or(DbError::NotConfigured)?;
            let db = config.connect()?;
            info!(
                backend = db.backend_name(),
                target = %config.display_target(),
                "database connection opened"
            );
            self.db = Some(db);
        }

        let db = self.db.as_mut().ok_or(DbError::NotConfigured)?;
        debug!(sql = %query.sql, params = query.param_count(), "executing statement");
        db.query(query)
    }
}
