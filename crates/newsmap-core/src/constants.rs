//! Constants shared by the core and storage crates.

/// Prefix mixed into every canonical event digest.
pub const EVENT_ID_PREFIX: &str = "evt:";

/// Length of a canonical event id (hex-encoded SHA-1).
pub const EVENT_ID_LEN: usize = 40;

/// Separator between the source and the local id of a news global id.
pub const NEWS_ID_SEPARATOR: char = ':';

// --- Storage defaults ---
pub const DEFAULT_DB_FILENAME: &str = "newsmap.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const MAX_READ_POOL_SIZE: usize = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Mapping defaults ---
pub const DEFAULT_SKIP_MALFORMED: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "newsmap=info";
pub const LOG_ENV_VAR: &str = "NEWSMAP_LOG";
