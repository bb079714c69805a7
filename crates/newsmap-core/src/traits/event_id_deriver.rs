//! EventIdDeriver trait.
//!
//! The mapping store asks a deriver for each payload's key before writing.
//! The default implementation is `canonical::AbstractDigestDeriver`; anything
//! that keys event entities must go through the same deriver so both sides of
//! the join agree.

use crate::errors::PayloadError;
use crate::types::EventPayload;

/// Maps an event payload to its stable identifier. Must be pure: no I/O and
/// the same output for the same normalized input across processes.
pub trait EventIdDeriver: Send + Sync {
    fn derive(&self, payload: &EventPayload) -> Result<String, PayloadError>;
}

impl<T: EventIdDeriver + ?Sized> EventIdDeriver for std::sync::Arc<T> {
    fn derive(&self, payload: &EventPayload) -> Result<String, PayloadError> {
        (**self).derive(payload)
    }
}
