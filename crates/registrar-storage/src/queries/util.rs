//! rusqlite error translation and column decoding shared by the query modules.

use std::str::FromStr;

use registrar_core::errors::{RegistrarError, StorageError};
use rusqlite::types::Type;
use rusqlite::{ffi, ErrorCode};

/// Map a rusqlite error to the storage error it represents.
/// SQLITE_BUSY and SQLITE_LOCKED become `Busy`; everything else is `SqliteError`.
pub fn storage_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StorageError::Busy {
            message: e.to_string(),
        },
        _ => StorageError::sqlite(e.to_string()),
    }
}

pub fn sql_err(e: rusqlite::Error) -> RegistrarError {
    storage_err(e).into()
}

/// Column named by a UNIQUE or PRIMARY KEY violation, e.g. `u_registration_no`
/// for "UNIQUE constraint failed: students.u_registration_no".
pub fn unique_violation_column(e: &rusqlite::Error) -> Option<String> {
    match e {
        rusqlite::Error::SqliteFailure(f, Some(msg))
            if f.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || f.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            let (_, columns) = msg.split_once("failed: ")?;
            let first = columns.split(',').next()?.trim();
            Some(first.rsplit('.').next().unwrap_or(first).to_string())
        }
        _ => None,
    }
}

pub fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _) if f.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Decode a TEXT column holding an enum code.
pub fn parse_code<T>(idx: usize, raw: &str) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    raw.parse().map_err(|msg: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
    })
}

/// Storage columns are INTEGER; catalog numbers are u32 in the model.
pub fn to_u32(idx: usize, value: i64) -> rusqlite::Result<u32> {
    u32::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}
