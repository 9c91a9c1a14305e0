//! SQLite-style embedded dialect.
//!
//! Tables come from `sqlite_master`. Columns are recovered from the table's
//! `CREATE TABLE` statement: the parenthesized body is split on top-level
//! commas and the leading token of each column-definition clause is its name.
//!
//! Uses:
//! - `?n` placeholders
//! - Double-quoted identifiers

use super::Dialect;
use crate::db::{quote_identifier, CompiledQuery, QueryRows};

/// Leading keywords of table-constraint clauses, which define no column.
const CONSTRAINT_KEYWORDS: [&str; 5] = ["CONSTRAINT", "PRIMARY", "UNIQUE", "CHECK", "FOREIGN"];

/// Embedded single-file dialect implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedDialect;

impl Dialect for EmbeddedDialect {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }

    fn quote_identifier(&self, name: &str) -> String {
        quote_identifier(name, '"')
    }

    fn list_tables(&self) -> CompiledQuery {
        CompiledQuery::new(
            r"SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'",
        )
    }

    fn list_columns(&self, table: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = {}",
            self.placeholder(1)
        ))
        .bind(table)
    }

    fn table_exists(&self, table: &str) -> CompiledQuery {
        CompiledQuery::new(format!(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = {}",
            self.placeholder(1)
        ))
        .bind(table)
    }

    /// Table-qualified, so an unknown column is an error rather than a string literal.
    fn column_ref(&self, table: &str, column: &str) -> String {
        format!("{}.{}", self.quote_identifier(table), self.quote_identifier(column))
    }

    /// Listed values are the text form of each cell. Columns without a type or
    /// with BLOB affinity never compare equal to a text parameter, so the text
    /// form is matched as well. The typed comparison keeps `1` matching `1.0`.
    fn value_predicate(&self, table: &str, column: &str) -> String {
        let column = self.column_ref(table, column);
        let value = self.placeholder(1);
        format!("({column} = {value} OR CAST({column} AS TEXT) = {value})")
    }

    fn column_names(&self, rows: &QueryRows) -> Vec<String> {
        rows.scalar()
            .and_then(|value| value.as_str())
            .map(parse_create_columns)
            .unwrap_or_default()
    }
}

/// Extract column names from a `CREATE TABLE name (...)` statement.
pub fn parse_create_columns(create_sql: &str) -> Vec<String> {
    let Some(open) = create_sql.find('(') else {
        return Vec::new();
    };
    let Some(close) = create_sql.rfind(')') else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }

    split_top_level(&create_sql[open + 1..close])
        .into_iter()
        .filter_map(leading_identifier)
        .filter(|name| {
            !CONSTRAINT_KEYWORDS
                .iter()
                .any(|keyword| name.eq_ignore_ascii_case(keyword))
        })
        .collect()
}

/// Split on commas that are outside parentheses and quoted text.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in body.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' | '`' => quote = Some(c),
                '[' => quote = Some(']'),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    clauses.push(&body[start..idx]);
                    start = idx + 1;
                }
                _ => {}
            },
        }
    }
    clauses.push(&body[start..]);
    clauses
}

/// The first token of a clause with identifier quoting removed.
fn leading_identifier(clause: &str) -> Option<String> {
    let clause = clause.trim_start();
    let mut chars = clause.chars();
    let first = chars.next()?;

    let close = match first {
        '"' | '`' | '\'' => first,
        '[' => ']',
        _ => {
            let end = clause
                .find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(clause.len());
            return Some(clause[..end].to_string());
        }
    };

    // A doubled closing quote inside a quoted name stands for one literal quote.
    let mut name = String::new();
    let mut rest = chars.peekable();
    while let Some(c) = rest.next() {
        if c == close {
            if close != ']' && rest.peek() == Some(&close) {
                rest.next();
                name.push(c);
                continue;
            }
            return Some(name);
        }
        name.push(c);
    }
    Some(name)
}
