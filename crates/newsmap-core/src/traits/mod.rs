//! Trait seams between the core and the storage layer.

pub mod event_id_deriver;

pub use event_id_deriver::EventIdDeriver;
