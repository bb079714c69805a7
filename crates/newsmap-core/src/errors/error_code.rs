//! NewsmapErrorCode trait: stable string codes for callers across a process boundary.

/// Every error enum implements this to expose a structured code string.
pub trait NewsmapErrorCode {
    /// Returns the error code string (e.g., "STORAGE_UNAVAILABLE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MALFORMED_PAYLOAD: &str = "MALFORMED_PAYLOAD";
pub const INVALID_NEWS_ID: &str = "INVALID_NEWS_ID";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
