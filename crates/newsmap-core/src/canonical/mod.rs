//! Canonical event id derivation.
//!
//! `event_id = hex(sha1("evt:" + trim(abstract)))`. The event store keys its
//! event entities with this same function, which makes the id the join key
//! between that store and the mapping table. Never reimplement it elsewhere.

use sha1::{Digest, Sha1};

use crate::constants::{EVENT_ID_LEN, EVENT_ID_PREFIX};
use crate::errors::PayloadError;
use crate::traits::EventIdDeriver;
use crate::types::EventPayload;

/// Normalize an abstract before hashing. Case is significant.
pub fn normalize_abstract(text: &str) -> &str {
    text.trim()
}

/// Derive the canonical id of an event from its abstract alone.
pub fn canonical_event_id_from_abstract(text: &str) -> Result<String, PayloadError> {
    let normalized = normalize_abstract(text);
    if normalized.is_empty() {
        return Err(PayloadError::InvalidField {
            field: "abstract",
            message: "blank after trimming".to_string(),
        });
    }

    let mut hasher = Sha1::new();
    hasher.update(EVENT_ID_PREFIX.as_bytes());
    hasher.update(normalized.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Derive the canonical id of an event payload.
pub fn canonical_event_id(payload: &EventPayload) -> Result<String, PayloadError> {
    let text = payload
        .abstract_text
        .as_deref()
        .ok_or(PayloadError::MissingField { field: "abstract" })?;
    canonical_event_id_from_abstract(text)
}

/// Whether `value` has the shape of a canonical id (40 lowercase hex chars).
pub fn is_canonical_event_id(value: &str) -> bool {
    value.len() == EVENT_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// The default deriver, backed by `canonical_event_id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbstractDigestDeriver;

impl EventIdDeriver for AbstractDigestDeriver {
    fn derive(&self, payload: &EventPayload) -> Result<String, PayloadError> {
        canonical_event_id(payload)
    }
}
