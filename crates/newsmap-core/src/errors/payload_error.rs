//! Malformed event payload errors.

use super::error_code::{self, NewsmapErrorCode};

/// Raised when an event payload cannot be canonicalized.
///
/// Not retryable: the upstream extraction output has to be fixed. Partial
/// payloads are rejected instead of hashed, since a digest of the wrong fields
/// would look like a valid id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("event payload is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("event payload field `{field}` is invalid: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("event payload must be an object, got {found}")]
    NotAnObject { found: &'static str },
}

impl NewsmapErrorCode for PayloadError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_PAYLOAD
    }
}
