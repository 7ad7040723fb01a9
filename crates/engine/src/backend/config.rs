//! Store configuration via `permstore.toml`
//!
//! On first open, a default `permstore.toml` is created in the data
//! directory. To change settings, edit the file and reopen the backend.

use serde::{Deserialize, Serialize};
use std::path::Path;

use permstore_core::{Error, Result};

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "permstore.toml";

/// Which storage backend a datastore is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Process memory; nothing survives a restart
    Memory,
    /// JSON files in the data directory
    File,
}

/// Store configuration loaded from `permstore.toml`.
///
/// # Example
///
/// ```toml
/// name = "main"
/// storage = "file"
/// worker_threads = 4
/// max_queue_depth = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Display name reported by the datastore.
    #[serde(default = "default_name")]
    pub name: String,
    /// Storage backend: `"file"` or `"memory"`.
    #[serde(default = "default_storage")]
    pub storage: String,
    /// Worker threads running dispatched operations.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    /// Dispatched operations allowed to wait in the queue.
    #[serde(default = "default_max_queue_depth")]
    pub max_queue_depth: usize,
}

fn default_name() -> String {
    "permstore".to_string()
}

fn default_storage() -> String {
    "file".to_string()
}

fn default_worker_threads() -> usize {
    4
}

fn default_max_queue_depth() -> usize {
    4096
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            storage: default_storage(),
            worker_threads: default_worker_threads(),
            max_queue_depth: default_max_queue_depth(),
        }
    }
}

impl StoreConfig {
    /// Configuration for an ephemeral in-memory store
    pub fn memory() -> Self {
        Self {
            name: "memory".to_string(),
            storage: "memory".to_string(),
            ..Self::default()
        }
    }

    /// Parse the storage string into a `StorageKind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"file"` or `"memory"`.
    pub fn storage_kind(&self) -> Result<StorageKind> {
        match self.storage.as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            other => Err(Error::InvalidConfig(format!(
                "Invalid storage '{}' in {}. Expected \"file\" or \"memory\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Check every field that has a restricted range.
    pub fn validate(&self) -> Result<()> {
        self.storage_kind()?;
        if self.worker_threads == 0 {
            return Err(Error::InvalidConfig(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.max_queue_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_queue_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# permstore configuration
#
# Name reported by the datastore
name = "permstore"

# Storage backend: "file" (default) or "memory"
#   "file"   = one JSON file per user/group/track in this directory
#   "memory" = nothing is kept after the process exits
storage = "file"

# Worker threads running non-blocking operations (default: 4)
worker_threads = 4

# Non-blocking operations allowed to wait for a worker (default: 4096).
# Further dispatches are rejected until the queue drains.
max_queue_depth = 4096
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
