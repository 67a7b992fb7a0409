//! StorageConfig and store path resolution.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_store_path() -> PathBuf {
    PathBuf::from(".pathindex/store")
}

/// Which path store implementation backs the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Records kept in process memory; rebuilt on every start
    Memory,
    /// Records persisted in a sled database
    #[default]
    Sled,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path to the sled store (relative to workspace root)
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl StorageConfig {
    /// Resolve the store location. The default path maps into the XDG data directory.
    pub fn resolve_store_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        if self.store_path == default_store_path() {
            return Ok(xdg::workspace_data_dir(workspace_root)?.join("store"));
        }
        if self.store_path.is_absolute() {
            return Ok(self.store_path.clone());
        }
        Ok(workspace_root.join(&self.store_path))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            store_path: default_store_path(),
        }
    }
}
