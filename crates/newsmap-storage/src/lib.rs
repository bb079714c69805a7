//! # newsmap-storage
//!
//! SQLite persistence for the news/event mapping table: a serialized writer
//! plus a read pool, `user_version` migrations, SQL queries, and the
//! `MappingStore` facade used by the extraction pipeline.

pub mod connection;
pub mod mapping_store;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use mapping_store::MappingStore;

use newsmap_core::errors::StorageError;
use rusqlite::ErrorCode;

/// Classify a rusqlite error. Lock contention becomes `Busy`; everything else
/// means the storage cannot serve the request.
pub(crate) fn to_storage_err(context: &str, e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => StorageError::Busy {
            message: format!("{context}: {e}"),
        },
        _ => StorageError::Unavailable {
            message: format!("{context}: {e}"),
        },
    }
}
