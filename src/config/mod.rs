//! Configuration
//!
//! Layered settings for the listing source, the store backend, search behaviour and logging.
//! Precedence (lowest to highest): built-in defaults, global file, workspace file, environment.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::{StorageConfig, StoreBackend};

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::store::CaseMode;
use crate::types::{DEFAULT_INDENT_UNIT, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_listing_path() -> PathBuf {
    PathBuf::from("data/file_structure.txt")
}

fn default_indent_unit() -> usize {
    DEFAULT_INDENT_UNIT
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Where the listing comes from and how it is indented
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Listing file (relative paths resolve against the workspace root)
    #[serde(default = "default_listing_path")]
    pub path: PathBuf,

    /// Whitespace characters per nesting level
    #[serde(default = "default_indent_unit")]
    pub indent_unit: usize,
}

impl ListingConfig {
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workspace_root.join(&self.path)
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            path: default_listing_path(),
            indent_unit: default_indent_unit(),
        }
    }
}

/// Search behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub case_mode: CaseMode,

    /// Separator placed between path segments
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_mode: CaseMode::default(),
            separator: default_separator(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathIndexConfig {
    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PathIndexConfig {
    /// Reject settings the builder or renderer cannot work with
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.listing.indent_unit == 0 {
            return Err(ApiError::ConfigError(
                "listing.indent_unit must be at least 1".to_string(),
            ));
        }
        if self.search.separator.is_empty() {
            return Err(ApiError::ConfigError(
                "search.separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
