//! Mapping batch policy.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SKIP_MALFORMED;

/// How `store_mappings` treats payloads that cannot be canonicalized.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MappingConfig {
    /// `true`: skip and log malformed events, commit the rest.
    /// `false`: one malformed event aborts the whole batch before any write.
    pub skip_malformed: Option<bool>,
}

impl MappingConfig {
    /// Returns the effective policy, defaulting to skipping.
    pub fn effective_skip_malformed(&self) -> bool {
        self.skip_malformed.unwrap_or(DEFAULT_SKIP_MALFORMED)
    }

    /// All-or-nothing batches.
    pub fn strict() -> Self {
        Self {
            skip_malformed: Some(false),
        }
    }
}
