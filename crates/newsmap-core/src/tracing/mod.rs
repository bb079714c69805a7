//! Observability for newsmap.
//! `tracing` crate with `EnvFilter`, configured through `NEWSMAP_LOG`.

pub mod setup;

pub use setup::init_tracing;
