//! # newsmap-core
//!
//! Foundation crate for the news/event mapping store.
//! Defines types, errors, config, constants, tracing setup, and the canonical
//! event id derivation. `newsmap-storage` depends on this.

pub mod canonical;
pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used items at the crate root.
pub use canonical::{canonical_event_id, canonical_event_id_from_abstract, AbstractDigestDeriver};
pub use config::NewsmapConfig;
pub use errors::{MappingError, PayloadError, StorageError};
pub use traits::EventIdDeriver;
pub use types::{EventPayload, MappingStats, NewsEventMapping, NewsGlobalId, StoreReport};
