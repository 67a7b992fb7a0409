//! Path Record Store
//!
//! Flat `(name, parent_id, id)` table holding the durable projection of a listing tree.
//! Contents are replaced wholesale on every rebuild and are read-only while queries run.

pub mod persistence;

use crate::error::StorageError;
use crate::types::{NodeId, NO_PARENT};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// PathRecord: one listing entry as stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathRecord {
    pub name: String,
    pub parent_id: NodeId,
    pub id: NodeId,
}

impl PathRecord {
    pub fn new(name: impl Into<String>, parent_id: NodeId, id: NodeId) -> Self {
        Self {
            name: name.into(),
            parent_id,
            id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == NO_PARENT
    }
}

/// How record names are compared against a search fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseMode {
    /// Exact prefix on the stored casing
    #[default]
    Sensitive,
    /// ASCII letters compare without case, like SQL `LIKE`
    AsciiInsensitive,
}

impl CaseMode {
    pub fn matches_prefix(self, name: &str, prefix: &str) -> bool {
        match self {
            CaseMode::Sensitive => name.starts_with(prefix),
            CaseMode::AsciiInsensitive => name
                .as_bytes()
                .get(..prefix.len())
                .map(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
                .unwrap_or(false),
        }
    }
}

/// Facts recorded alongside a rebuild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub node_count: usize,
    /// blake3 of the listing text, hex encoded
    pub listing_digest: String,
    /// RFC 3339 timestamp of the rebuild
    pub built_at: String,
}

/// Path store interface
///
/// All listing methods return records in ascending id order, which is listing order.
pub trait PathStore: Send + Sync {
    /// Atomically replace every record (and the metadata) with the given set.
    fn replace_all(
        &self,
        records: &[PathRecord],
        metadata: Option<&StoreMetadata>,
    ) -> Result<(), StorageError>;

    fn get(&self, id: NodeId) -> Result<Option<PathRecord>, StorageError>;

    /// Records for each id present in the store, in the order asked; absent ids are skipped.
    fn get_many(&self, ids: &[NodeId]) -> Result<Vec<PathRecord>, StorageError> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get(*id)? {
                found.push(record);
            }
        }
        Ok(found)
    }

    /// Records whose name starts with `prefix`.
    fn named_like(&self, prefix: &str, case: CaseMode) -> Result<Vec<PathRecord>, StorageError>;

    fn children_of(&self, parent_id: NodeId) -> Result<Vec<PathRecord>, StorageError>;

    fn len(&self) -> Result<usize, StorageError>;

    fn metadata(&self) -> Result<Option<StoreMetadata>, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Record `id` followed by each of its ancestors, ending with the root.
    fn ancestors(&self, id: NodeId) -> Result<Vec<PathRecord>, StorageError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = id;
        loop {
            if !seen.insert(current) {
                return Err(StorageError::InvalidRecord(format!(
                    "parent cycle reached from record {}",
                    id
                )));
            }
            let record = self
                .get(current)?
                .ok_or(StorageError::RecordNotFound(current))?;
            current = record.parent_id;
            chain.push(record);
            if current == NO_PARENT {
                return Ok(chain);
            }
        }
    }
}

/// Reject record sets the store cannot hold: negative or duplicate ids, bad parents.
pub(crate) fn validate_records(records: &[PathRecord]) -> Result<(), StorageError> {
    let mut ids = HashSet::with_capacity(records.len());
    for record in records {
        if record.id < 0 {
            return Err(StorageError::InvalidRecord(format!(
                "negative id {} for {:?}",
                record.id, record.name
            )));
        }
        if record.parent_id < NO_PARENT {
            return Err(StorageError::InvalidRecord(format!(
                "parent id {} of record {} is below the root sentinel",
                record.parent_id, record.id
            )));
        }
        if !ids.insert(record.id) {
            return Err(StorageError::InvalidRecord(format!(
                "duplicate id {}",
                record.id
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Snapshot {
    records: BTreeMap<NodeId, PathRecord>,
    metadata: Option<StoreMetadata>,
}

/// In-memory store: readers hold an immutable snapshot, rebuilds swap in a new one
#[derive(Debug, Default)]
pub struct MemoryPathStore {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl MemoryPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read())
    }
}

impl PathStore for MemoryPathStore {
    fn replace_all(
        &self,
        records: &[PathRecord],
        metadata: Option<&StoreMetadata>,
    ) -> Result<(), StorageError> {
        validate_records(records)?;
        let next = Snapshot {
            records: records.iter().map(|r| (r.id, r.clone())).collect(),
            metadata: metadata.cloned(),
        };
        *self.snapshot.write() = Arc::new(next);
        Ok(())
    }

    fn get(&self, id: NodeId) -> Result<Option<PathRecord>, StorageError> {
        Ok(self.current().records.get(&id).cloned())
    }

    fn get_many(&self, ids: &[NodeId]) -> Result<Vec<PathRecord>, StorageError> {
        let snapshot = self.current();
        Ok(ids
            .iter()
            .filter_map(|id| snapshot.records.get(id).cloned())
            .collect())
    }

    fn named_like(&self, prefix: &str, case: CaseMode) -> Result<Vec<PathRecord>, StorageError> {
        Ok(self
            .current()
            .records
            .values()
            .filter(|r| case.matches_prefix(&r.name, prefix))
            .cloned()
            .collect())
    }

    fn children_of(&self, parent_id: NodeId) -> Result<Vec<PathRecord>, StorageError> {
        Ok(self
            .current()
            .records
            .values()
            .filter(|r| r.parent_id == parent_id)
            .cloned()
            .collect())
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.current().records.len())
    }

    fn metadata(&self) -> Result<Option<StoreMetadata>, StorageError> {
        Ok(self.current().metadata.clone())
    }
}
