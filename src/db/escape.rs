//! Quoting utilities for SQL identifiers.
//!
//! Table and column names arrive from filesystem paths and cannot be bound as
//! parameters, so they are quoted and interpolated.

/// Quote an identifier with `quote_char`, doubling any embedded occurrence.
///
/// # Arguments
/// * `name` - The identifier to quote
/// * `quote_char` - The quote character ('"' for ANSI SQL, '`' for MySQL)
pub fn quote_identifier(name: &str, quote_char: char) -> String {
    let mut result = String::with_capacity(name.len() + 2);
    result.push(quote_char);
    for c in name.chars() {
        if c == quote_char {
            result.push(quote_char);
        }
        result.push(c);
    }
    result.push(quote_char);
    result
}
