//! CLI Tooling
//!
//! Command-line interface over the query facade: rebuild the index from a listing, search it,
//! locate paths and report status. Every command goes through [`PathIndex`].

use crate::config::{ConfigLoader, PathIndexConfig, StoreBackend};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::query::{IndexStatus, PathIndex};
use crate::store::StoreMetadata;
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::info;

/// pathindex - search a directory listing by name prefix
#[derive(Parser)]
#[command(name = "pathindex")]
#[command(about = "Index an indented directory listing and search it by name prefix")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Overlay logging flags onto the configured logging section
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the index from the listing file
    Init {
        /// Listing file to read instead of the configured one
        #[arg(long)]
        listing: Option<PathBuf>,
    },
    /// Find every path whose last segment starts with the fragment
    Find {
        /// Name prefix to search for
        fragment: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve a full path to its node id
    Locate {
        /// Full path, segments joined by the configured separator
        path: String,
    },
    /// Show index status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context for command execution
pub struct CliContext {
    index: PathIndex,
    config: PathIndexConfig,
    workspace_root: PathBuf,
    /// Whether a memory-backed index has been built in this process
    memory_loaded: Mutex<bool>,
}

impl CliContext {
    /// Load configuration the way the CLI does: explicit file, or layered sources.
    pub fn load_config(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<PathIndexConfig, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to load config from {}: {}",
                    path.display(),
                    e
                ))
            })?,
            None => ConfigLoader::load(workspace_root)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(&workspace_root, config_path.as_deref())?;
        Self::from_config(workspace_root, config)
    }

    /// Create a context from an already loaded configuration
    pub fn from_config(workspace_root: PathBuf, config: PathIndexConfig) -> Result<Self, ApiError> {
        let index = PathIndex::from_config(&config, &workspace_root)?;
        Ok(Self {
            index,
            config,
            workspace_root,
            memory_loaded: Mutex::new(false),
        })
    }

    /// A memory-backed index holds nothing between runs, so searches build it on first use.
    fn ensure_loaded(&self) -> Result<(), ApiError> {
        if self.config.storage.backend != StoreBackend::Memory {
            return Ok(());
        }
        let mut loaded = self.memory_loaded.lock();
        if !*loaded {
            self.index.initialize()?;
            *loaded = true;
        }
        Ok(())
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn config(&self) -> &PathIndexConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init { listing } => {
                let metadata = match listing {
                    Some(path) => {
                        let path = if path.is_absolute() {
                            path.clone()
                        } else {
                            self.workspace_root.join(path)
                        };
                        let text = std::fs::read_to_string(&path).map_err(|e| {
                            ApiError::ListingUnavailable(format!("{}: {}", path.display(), e))
                        })?;
                        self.index.initialize_from_str(&text)?
                    }
                    None => self.index.initialize()?,
                };
                *self.memory_loaded.lock() = true;
                info!(nodes = metadata.node_count, "Index initialized");
                Ok(format_init_text(&metadata))
            }
            Commands::Find { fragment, format } => {
                self.ensure_loaded()?;
                let paths = self.index.query(fragment.as_deref())?;
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&paths)?)
                } else {
                    Ok(paths.join("\n"))
                }
            }
            Commands::Locate { path } => {
                self.ensure_loaded()?;
                match self.index.locate(path) {
                    Ok(Some(id)) => Ok(id.to_string()),
                    Ok(None) => Ok(format!("No node at {}", path)),
                    Err(ApiError::AmbiguousPath { candidates, .. }) => {
                        let ids: Vec<String> = candidates.iter().map(|id| id.to_string()).collect();
                        Ok(format!("Ambiguous path {}: nodes {}", path, ids.join(", ")))
                    }
                    Err(e) => Err(e),
                }
            }
            Commands::Status { format } => {
                let status = self.index.status()?;
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&status)?)
                } else {
                    Ok(format_status_text(&status))
                }
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }
}

fn format_init_text(metadata: &StoreMetadata) -> String {
    format!(
        "Indexed {} nodes (listing {}...)",
        metadata.node_count,
        &metadata.listing_digest[..metadata.listing_digest.len().min(12)]
    )
}

fn format_status_text(status: &IndexStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Initialized: {}\n",
        if status.initialized { "yes" } else { "no" }
    ));
    out.push_str(&format!("Nodes: {}\n", status.node_count));
    if let Some(digest) = &status.listing_digest {
        out.push_str(&format!("Listing digest: {}\n", digest));
    }
    if let Some(built_at) = &status.built_at {
        out.push_str(&format!("Built at: {}\n", built_at));
    }
    out
}
