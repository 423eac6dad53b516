//! Store configuration via `soupstore.toml`
//!
//! A store directory carries a small TOML file. On first open a default
//! `soupstore.toml` is written; edit it and reopen to change settings.

use serde::{Deserialize, Serialize};
use soupstore_core::{StoreError, StoreResult, DEFAULT_PAGE_SIZE};
use std::path::{Path, PathBuf};

/// Config file name placed in a store directory.
pub const CONFIG_FILE_NAME: &str = "soupstore.toml";

/// Store configuration loaded from `soupstore.toml`.
///
/// # Example
///
/// ```toml
/// default_page_size = 10
/// # data_dir = "/var/lib/soupstore"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Page size for query specs that omit `pageSize`.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Directory holding the session snapshot. `None` keeps the store purely
    /// in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// In-memory config persisting to `dir`.
    pub fn persistent(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Reject values the store cannot run with.
    pub fn validate(&self) -> StoreResult<()> {
        if self.default_page_size == 0 {
            return Err(StoreError::malformed(
                "default_page_size in soupstore.toml must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> StoreResult<Self> {
        let config: StoreConfig = toml::from_str(content).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Io(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Load `soupstore.toml` from `dir`, writing the default file first if
    /// it does not exist.
    pub fn load_or_default(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            std::fs::write(&path, Self::default_toml()).map_err(|e| {
                StoreError::Io(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Self::from_file(&path)
    }

    /// Serialize this config to TOML.
    pub fn to_toml(&self) -> StoreResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| StoreError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# SoupStore configuration
#
# Page size used by queries that do not specify one (default: 10)
default_page_size = 10

# Directory for the session snapshot. Leave unset for a purely in-memory store.
# data_dir = "/var/lib/soupstore"
"#
    }
}
