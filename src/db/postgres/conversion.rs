//! Type conversion from PostgreSQL result cells to `DbValue`.
//!
//! Results arrive in binary format, so each column is decoded with the Rust type
//! matching its declared PostgreSQL type. Statements returning other types
//! (numeric, timestamps, uuid, json, arrays) are rewritten by `text_projection`
//! so the server renders those columns as text.

use postgres::types::{FromSql, Type};
use postgres::Row;
use tracing::debug;

use crate::db::{quote_identifier, DbError, DbValue};

/// Alias of the wrapped statement in a text projection.
const PROJECTION_ALIAS: &str = "dbfs_row";

/// Whether `convert_cell` decodes `ty` natively.
pub fn has_decoder(ty: &Type) -> bool {
    [
        Type::BOOL,
        Type::INT2,
        Type::INT4,
        Type::INT8,
        Type::OID,
        Type::FLOAT4,
        Type::FLOAT8,
        Type::BYTEA,
    ]
    .contains(ty)
        || <String as FromSql>::accepts(ty)
}

/// Rewrite `sql` so that every column without a decoder is cast to text.
///
/// Returns `None` when all columns decode natively. Column names are kept, so
/// the headers of the rewritten statement match the original ones.
pub fn text_projection<'a>(
    sql: &str,
    columns: impl IntoIterator<Item = (&'a str, &'a Type)>,
) -> Option<String> {
    let mut needs_cast = false;
    let projection: Vec<String> = columns
        .into_iter()
        .map(|(name, ty)| {
            let column = format!("{}.{}", PROJECTION_ALIAS, quote_identifier(name, '"'));
            if has_decoder(ty) {
                column
            } else {
                needs_cast = true;
                format!("{}::text AS {}", column, quote_identifier(name, '"'))
            }
        })
        .collect();

    needs_cast.then(|| {
        format!(
            "SELECT {} FROM ({}) AS {}",
            projection.join(", "),
            sql,
            PROJECTION_ALIAS
        )
    })
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> Result<Option<T>, DbError> {
    row.try_get::<_, Option<T>>(idx).map_err(|e| DbError::QueryFailed {
        message: e.to_string(),
    })
}

fn convert_cell(row: &Row, idx: usize, ty: &Type) -> Result<DbValue, DbError> {
    let value = if *ty == Type::BOOL {
        get::<bool>(row, idx)?.map(DbValue::Bool)
    } else if *ty == Type::INT2 {
        get::<i16>(row, idx)?.map(|v| DbValue::Integer(v.into()))
    } else if *ty == Type::INT4 {
        get::<i32>(row, idx)?.map(|v| DbValue::Integer(v.into()))
    } else if *ty == Type::INT8 {
        get::<i64>(row, idx)?.map(DbValue::Integer)
    } else if *ty == Type::OID {
        get::<u32>(row, idx)?.map(|v| DbValue::Integer(v.into()))
    } else if *ty == Type::FLOAT4 {
        get::<f32>(row, idx)?.map(|v| DbValue::Real(v.into()))
    } else if *ty == Type::FLOAT8 {
        get::<f64>(row, idx)?.map(DbValue::Real)
    } else if *ty == Type::BYTEA {
        get::<Vec<u8>>(row, idx)?.map(DbValue::Blob)
    } else {
        match row.try_get::<_, Option<String>>(idx) {
            Ok(text) => text.map(DbValue::Text),
            Err(_) => {
                debug!(column = idx, pg_type = %ty, "column type not projected to text, reading as null");
                None
            }
        }
    };

    Ok(value.unwrap_or(DbValue::Null))
}

/// Convert one result row into backend-neutral cells.
pub fn convert_row(row: &Row) -> Result<Vec<DbValue>, DbError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| convert_cell(row, idx, column.type_()))
        .collect()
}
