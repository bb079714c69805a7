//! Write connection utilities: BEGIN IMMEDIATE transactions.

use newsmap_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::to_storage_err;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
///
/// The write lock is taken at transaction start, so a concurrent writer waits
/// on `busy_timeout` instead of failing mid-batch. The transaction commits
/// when `f` returns `Ok`; on `Err` (or a panic) the guard rolls back on drop.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err("begin immediate transaction", e))?;

    let result = f(&tx)?;

    tx.commit().map_err(|e| to_storage_err("commit", e))?;
    Ok(result)
}
