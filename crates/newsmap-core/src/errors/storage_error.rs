//! Storage-layer errors for SQLite operations.

use super::error_code::{self, NewsmapErrorCode};

/// Errors surfaced by the mapping store when SQLite cannot serve a request.
///
/// Never retried internally. `is_transient` tells the caller whether a retry
/// has a chance of succeeding.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("database busy: {message}")]
    Busy { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Lock contention clears on its own; everything else needs intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }
}

impl NewsmapErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => error_code::STORAGE_UNAVAILABLE,
            Self::Busy { .. } => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
        }
    }
}
