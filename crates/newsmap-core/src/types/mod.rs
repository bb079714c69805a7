//! Domain types: news ids, event payloads, mapping records, batch reports.

pub mod event_payload;
pub mod mapping;
pub mod news_id;
pub mod report;

pub use event_payload::EventPayload;
pub use mapping::{MappingStats, NewsEventMapping};
pub use news_id::{validate_news_global_id, NewsGlobalId};
pub use report::{SkippedEvent, StoreReport};
