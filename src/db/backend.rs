//! Database backend trait for abstracting the SQL drivers.

use super::value::DbValue;
use super::DbError;

/// A positional parameter bound into a compiled statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    Text(String),
    Bytes(Vec<u8>),
}

impl QueryParam {
    /// Bind raw bytes, preferring a text parameter when they are valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(s) => Self::Text(s.to_string()),
            Err(_) => Self::Bytes(bytes.to_vec()),
        }
    }
}

impl From<&str> for QueryParam {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A statement ready for execution.
///
/// Contains the dialect-specific SQL text and the parameters to bind, in
/// placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl CompiledQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter; it binds to the next placeholder.
    pub fn bind(mut self, param: impl Into<QueryParam>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Get the number of parameters in this query.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

/// Result of a query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<DbValue>>,
}

impl QueryRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the first column, one per row.
    pub fn first_column(&self) -> impl Iterator<Item = &DbValue> {
        self.rows.iter().filter_map(|row| row.first())
    }

    /// The first cell of the first row, if any.
    pub fn scalar(&self) -> Option<&DbValue> {
        self.first_column().next()
    }
}

/// Trait for database drivers that can execute a compiled statement.
pub trait Database: Send {
    /// Execute a statement, returning every result row.
    fn query(&mut self, query: &CompiledQuery) -> Result<QueryRows, DbError>;

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
