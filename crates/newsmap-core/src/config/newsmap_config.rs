//! Top-level newsmap configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{MappingConfig, StorageConfig};
use crate::constants::MAX_READ_POOL_SIZE;
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "newsmap.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`NEWSMAP_*`)
/// 2. Project config (`newsmap.toml` in the project root)
/// 3. User config (`~/.newsmap/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NewsmapConfig {
    pub storage: StorageConfig,
    pub mapping: MappingConfig,
}

impl NewsmapConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 2: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (no layering).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &NewsmapConfig) -> Result<(), ConfigError> {
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 || size > MAX_READ_POOL_SIZE {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if config.storage.busy_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.busy_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref path) = config.storage.db_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.newsmap/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".newsmap").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut NewsmapConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: NewsmapConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut NewsmapConfig, other: &NewsmapConfig) {
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.storage.busy_timeout_ms.is_some() {
            base.storage.busy_timeout_ms = other.storage.busy_timeout_ms;
        }
        if other.mapping.skip_malformed.is_some() {
            base.mapping.skip_malformed = other.mapping.skip_malformed;
        }
    }

    /// Apply environment variable overrides. Unparseable values are ignored
    /// with a warning.
    fn apply_env_overrides(config: &mut NewsmapConfig) {
        if let Ok(val) = std::env::var("NEWSMAP_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("NEWSMAP_READ_POOL_SIZE") {
            match val.parse::<usize>() {
                Ok(v) => config.storage.read_pool_size = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid NEWSMAP_READ_POOL_SIZE"),
            }
        }
        if let Ok(val) = std::env::var("NEWSMAP_BUSY_TIMEOUT_MS") {
            match val.parse::<u32>() {
                Ok(v) => config.storage.busy_timeout_ms = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid NEWSMAP_BUSY_TIMEOUT_MS"),
            }
        }
        if let Ok(val) = std::env::var("NEWSMAP_SKIP_MALFORMED") {
            match val.parse::<bool>() {
                Ok(v) => config.mapping.skip_malformed = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring invalid NEWSMAP_SKIP_MALFORMED"),
            }
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
