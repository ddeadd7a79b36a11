//! Write connection utilities: BEGIN IMMEDIATE transactions.

use registrar_core::errors::RegistrarResult;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::queries::util::sql_err;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken at transaction start, so a check made inside
/// `f` cannot be invalidated by another writer before commit.
/// Any error from `f` rolls the transaction back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> RegistrarResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RegistrarResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(sql_err)?;
    let result = f(&tx)?;
    tx.commit().map_err(sql_err)?;
    Ok(result)
}
