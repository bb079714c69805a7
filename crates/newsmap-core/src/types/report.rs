//! StoreReport: outcome of one `try_store_mappings` batch.

use crate::errors::PayloadError;

/// An event that was left out of the batch because it could not be
/// canonicalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    /// Position of the payload in the input slice (0-based).
    pub index: usize,
    pub error: PayloadError,
}

/// Outcome of a committed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreReport {
    /// Distinct event ids derived from the batch, in payload order.
    pub event_ids: Vec<String>,
    /// Pairs created by this call.
    pub inserted: usize,
    /// Pairs that already existed and were left untouched.
    pub duplicates: usize,
    pub skipped: Vec<SkippedEvent>,
}

impl StoreReport {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
