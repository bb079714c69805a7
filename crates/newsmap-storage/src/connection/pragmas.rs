//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 64MB page cache, temp_store MEMORY.

use std::time::Duration;

use newsmap_core::errors::StorageError;
use rusqlite::Connection;

use crate::to_storage_err;

/// Apply performance and safety pragmas to the write connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA cache_size = -64000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| to_storage_err("apply pragmas", e))
}

/// Apply read-only pragmas to a read connection.
pub fn apply_read_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -64000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| to_storage_err("apply read pragmas", e))
}

/// How long a connection waits on a lock held by another connection.
pub fn set_busy_timeout(conn: &Connection, timeout: Duration) -> Result<(), StorageError> {
    conn.busy_timeout(timeout)
        .map_err(|e| to_storage_err("set busy_timeout", e))
}

/// Verify that WAL mode is active.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err("read journal_mode", e))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
