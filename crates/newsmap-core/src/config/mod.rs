//! Configuration system for newsmap.
//! TOML-based, layered resolution: env > project > user > defaults.

pub mod mapping_config;
pub mod newsmap_config;
pub mod storage_config;

pub use mapping_config::MappingConfig;
pub use newsmap_config::NewsmapConfig;
pub use storage_config::StorageConfig;
