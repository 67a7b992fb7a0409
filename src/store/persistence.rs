//! Sled-backed path store
//!
//! Records live in the `paths` tree keyed by big-endian id, so iteration order is id order.
//! Rebuild metadata lives in the `meta` tree. A rebuild replaces both in one transaction.

use super::{validate_records, CaseMode, PathRecord, PathStore, StoreMetadata};
use crate::error::StorageError;
use crate::types::NodeId;
use sled::transaction::{ConflictableTransactionResult, TransactionError, Transactional};
use sled::{Batch, Db, Tree};
use std::path::Path;
use tracing::debug;

const PATHS_TREE: &str = "paths";
const META_TREE: &str = "meta";
const METADATA_KEY: &[u8] = b"rebuild";

/// Path store persisted in a sled database
pub struct SledPathStore {
    db: Db,
    paths: Tree,
    meta: Tree,
}

impl SledPathStore {
    /// Open (or create) a store at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Throwaway store removed when dropped
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    pub fn from_db(db: Db) -> Result<Self, StorageError> {
        let paths = db.open_tree(PATHS_TREE)?;
        let meta = db.open_tree(META_TREE)?;
        Ok(Self { db, paths, meta })
    }

    fn decode(bytes: &[u8]) -> Result<PathRecord, StorageError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn scan(
        &self,
        mut keep: impl FnMut(&PathRecord) -> bool,
    ) -> Result<Vec<PathRecord>, StorageError> {
        let mut out = Vec::new();
        for entry in self.paths.iter() {
            let (_, value) = entry?;
            let record = Self::decode(&value)?;
            if keep(&record) {
                out.push(record);
            }
        }
        Ok(out)
    }
}

fn record_key(id: NodeId) -> [u8; 8] {
    (id as u64).to_be_bytes()
}

impl PathStore for SledPathStore {
    fn replace_all(
        &self,
        records: &[PathRecord],
        metadata: Option<&StoreMetadata>,
    ) -> Result<(), StorageError> {
        validate_records(records)?;

        let mut batch = Batch::default();
        for key in self.paths.iter().keys() {
            batch.remove(key?);
        }
        for record in records {
            batch.insert(record_key(record.id).to_vec(), bincode::serialize(record)?);
        }
        let metadata = metadata.map(bincode::serialize).transpose()?;

        (&self.paths, &self.meta)
            .transaction(|(paths, meta)| -> ConflictableTransactionResult<(), ()> {
                paths.apply_batch(&batch)?;
                match &metadata {
                    Some(bytes) => {
                        meta.insert(METADATA_KEY, bytes.clone())?;
                    }
                    None => {
                        meta.remove(METADATA_KEY)?;
                    }
                }
                Ok(())
            })
            .map_err(|e| match e {
                TransactionError::Abort(()) => {
                    StorageError::InvalidRecord("rebuild transaction aborted".to_string())
                }
                TransactionError::Storage(e) => StorageError::Database(e),
            })?;

        self.db.flush()?;
        debug!(records = records.len(), "Replaced sled path records");
        Ok(())
    }

    fn get(&self, id: NodeId) -> Result<Option<PathRecord>, StorageError> {
        if id < 0 {
            return Ok(None);
        }
        match self.paths.get(record_key(id))? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn named_like(&self, prefix: &str, case: CaseMode) -> Result<Vec<PathRecord>, StorageError> {
        self.scan(|r| case.matches_prefix(&r.name, prefix))
    }

    fn children_of(&self, parent_id: NodeId) -> Result<Vec<PathRecord>, StorageError> {
        self.scan(|r| r.parent_id == parent_id)
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.paths.len())
    }

    fn metadata(&self) -> Result<Option<StoreMetadata>, StorageError> {
        match self.meta.get(METADATA_KEY)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }
}
