//! Error handling for newsmap.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod mapping_error;
pub mod payload_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::NewsmapErrorCode;
pub use mapping_error::{MappingError, MappingResult};
pub use payload_error::PayloadError;
pub use storage_error::StorageError;
