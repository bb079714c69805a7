//! Persisted mapping records and aggregate counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One (document, event) association row. The surrogate row id is never
/// exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsEventMapping {
    pub news_global_id: String,
    pub event_id: String,
    pub created_at: DateTime<Utc>,
}

/// Table-wide counts for audits and dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingStats {
    pub total_mappings: u64,
    pub distinct_news: u64,
    pub distinct_events: u64,
}
