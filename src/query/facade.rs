//! Query facade
//!
//! `PathIndex` is the whole surface offered to outer layers: rebuild the store from the
//! configured listing, answer fragment queries, locate a rendered path, report status.
//! Rebuilds hold the write side of a gate and queries the read side, so a query never sees
//! a store in the middle of being replaced.

use crate::config::{PathIndexConfig, StoreBackend};
use crate::error::{ApiError, ListingError};
use crate::query::render::PathRenderer;
use crate::query::resolver::MatchResolver;
use crate::store::persistence::SledPathStore;
use crate::store::{CaseMode, MemoryPathStore, PathStore, StoreMetadata};
use crate::tree::builder::TreeBuilder;
use crate::types::{NodeId, NO_MATCHES, NO_PARENT};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Settings the facade needs from configuration
#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub indent_unit: usize,
    pub case_mode: CaseMode,
    pub separator: String,
    /// Listing read by [`PathIndex::initialize`]
    pub listing_path: Option<PathBuf>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        let config = PathIndexConfig::default();
        Self {
            indent_unit: config.listing.indent_unit,
            case_mode: config.search.case_mode,
            separator: config.search.separator,
            listing_path: None,
        }
    }
}

impl IndexOptions {
    pub fn from_config(config: &PathIndexConfig, workspace_root: &Path) -> Self {
        Self {
            indent_unit: config.listing.indent_unit,
            case_mode: config.search.case_mode,
            separator: config.search.separator.clone(),
            listing_path: Some(config.listing.resolve_path(workspace_root)),
        }
    }

    pub fn with_case_mode(mut self, case_mode: CaseMode) -> Self {
        self.case_mode = case_mode;
        self
    }

    pub fn with_listing_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.listing_path = Some(path.into());
        self
    }
}

/// Store state reported by [`PathIndex::status`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStatus {
    pub initialized: bool,
    pub node_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<String>,
}

/// Searchable index over one listing
pub struct PathIndex {
    store: Arc<dyn PathStore>,
    builder: TreeBuilder,
    renderer: PathRenderer,
    case_mode: CaseMode,
    listing_path: Option<PathBuf>,
    rebuild_gate: RwLock<()>,
}

impl PathIndex {
    pub fn new(store: Arc<dyn PathStore>, options: IndexOptions) -> Self {
        Self {
            store,
            builder: TreeBuilder::new(options.indent_unit).with_separator(options.separator.clone()),
            renderer: PathRenderer::new(options.separator),
            case_mode: options.case_mode,
            listing_path: options.listing_path,
            rebuild_gate: RwLock::new(()),
        }
    }

    /// Index backed by an in-memory store
    pub fn in_memory(options: IndexOptions) -> Self {
        Self::new(Arc::new(MemoryPathStore::new()), options)
    }

    /// Open the configured store backend for a workspace
    pub fn from_config(config: &PathIndexConfig, workspace_root: &Path) -> Result<Self, ApiError> {
        config.validate()?;
        let store: Arc<dyn PathStore> = match config.storage.backend {
            StoreBackend::Memory => Arc::new(MemoryPathStore::new()),
            StoreBackend::Sled => {
                let path = config.storage.resolve_store_path(workspace_root)?;
                debug!(store = %path.display(), "Opening sled path store");
                Arc::new(SledPathStore::open(&path)?)
            }
        };
        Ok(Self::new(
            store,
            IndexOptions::from_config(config, workspace_root),
        ))
    }

    pub fn listing_path(&self) -> Option<&Path> {
        self.listing_path.as_deref()
    }

    pub fn separator(&self) -> &str {
        self.renderer.separator()
    }

    /// Wipe and rebuild the store from the configured listing file
    pub fn initialize(&self) -> Result<StoreMetadata, ApiError> {
        let path = self.listing_path.as_ref().ok_or_else(|| {
            ApiError::ListingUnavailable("no listing file configured".to_string())
        })?;
        let text = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ListingUnavailable(format!("{}: {}", path.display(), e))
        })?;
        self.initialize_from_str(&text)
    }

    /// Wipe and rebuild the store from listing text.
    ///
    /// A malformed listing leaves the previous contents in place. An empty listing clears
    /// the store.
    pub fn initialize_from_str(&self, text: &str) -> Result<StoreMetadata, ApiError> {
        let records = match self.builder.build(text) {
            Ok(tree) => tree.records(),
            Err(ListingError::Empty) => {
                info!("Listing is empty; clearing the path store");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let metadata = StoreMetadata {
            node_count: records.len(),
            listing_digest: hex::encode(blake3::hash(text.as_bytes()).as_bytes()),
            built_at: chrono::Utc::now().to_rfc3339(),
        };

        {
            let _gate = self.rebuild_gate.write();
            self.store.replace_all(&records, Some(&metadata))?;
        }

        info!(
            nodes = metadata.node_count,
            digest = %metadata.listing_digest,
            "Rebuilt path store"
        );
        Ok(metadata)
    }

    /// Full paths of every record whose name starts with `fragment`.
    ///
    /// Leaves of the matched sub-tree come first, then matched interior nodes. An absent or
    /// blank fragment, or one matching nothing, yields the single no-matches entry.
    pub fn query(&self, fragment: Option<&str>) -> Result<Vec<String>, ApiError> {
        let fragment = match fragment {
            Some(f) if !f.trim().is_empty() => f,
            _ => return Ok(no_matches()),
        };

        let _gate = self.rebuild_gate.read();
        let resolution = MatchResolver::new(self.store.as_ref(), self.case_mode).resolve(fragment)?;

        let mut paths = Vec::new();
        for record in resolution.ordered_records() {
            match self.renderer.render(record, &resolution.tree_dict) {
                Ok(path) => paths.push(path),
                Err(e) => error!(id = record.id, error = %e, "Dropping match with broken ancestry"),
            }
        }

        debug!(fragment, results = paths.len(), "Answered query");
        if paths.is_empty() {
            return Ok(no_matches());
        }
        Ok(paths)
    }

    /// Shorthand for `query(Some(fragment))`
    pub fn find(&self, fragment: &str) -> Result<Vec<String>, ApiError> {
        self.query(Some(fragment))
    }

    /// Descend from the root along the segments of a rendered path.
    ///
    /// Every sibling carrying a segment's name is followed, so a path is found as long as one
    /// node ends it. When several nodes render to the same path the candidates are reported as
    /// [`ApiError::AmbiguousPath`].
    pub fn locate(&self, path: &str) -> Result<Option<NodeId>, ApiError> {
        let _gate = self.rebuild_gate.read();
        let mut frontier = vec![NO_PARENT];
        for segment in self.renderer.split(path) {
            let mut next = Vec::new();
            for parent in &frontier {
                next.extend(
                    self.store
                        .children_of(*parent)?
                        .into_iter()
                        .filter(|r| r.name == segment)
                        .map(|r| r.id),
                );
            }
            if next.is_empty() {
                return Ok(None);
            }
            frontier = next;
        }

        match frontier.as_slice() {
            [id] => Ok(Some(*id)),
            candidates => Err(ApiError::AmbiguousPath {
                path: path.to_string(),
                candidates: candidates.to_vec(),
            }),
        }
    }

    pub fn status(&self) -> Result<IndexStatus, ApiError> {
        let _gate = self.rebuild_gate.read();
        let metadata = self.store.metadata()?;
        Ok(IndexStatus {
            initialized: metadata.is_some(),
            node_count: self.store.len()?,
            listing_digest: metadata.as_ref().map(|m| m.listing_digest.clone()),
            built_at: metadata.map(|m| m.built_at),
        })
    }
}

fn no_matches() -> Vec<String> {
    vec![NO_MATCHES.to_string()]
}
