//! Errors returned by the fallible mapping store entry points.

use super::error_code::{self, NewsmapErrorCode};
use super::payload_error::PayloadError;
use super::storage_error::StorageError;

/// Failure of a whole `try_store_mappings` call.
///
/// Malformed payloads only show up here in strict mode; otherwise they are
/// skipped and reported in the `StoreReport`.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("invalid news global id {value:?}: {reason}")]
    InvalidNewsId { value: String, reason: String },

    #[error("malformed event payload at index {index}: {source}")]
    MalformedPayload {
        index: usize,
        #[source]
        source: PayloadError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type MappingResult<T> = Result<T, MappingError>;

impl NewsmapErrorCode for MappingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNewsId { .. } => error_code::INVALID_NEWS_ID,
            Self::MalformedPayload { source, .. } => source.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
