//! Error types for listing parsing, storage, path rendering and the public API.

use crate::types::NodeId;
use thiserror::Error;

/// Structural problems found while parsing an indentation listing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("listing contains no entries")]
    Empty,

    #[error("line {line}: level {level} is deeper than the allowed level {max_level}")]
    LevelJump {
        line: usize,
        level: usize,
        max_level: usize,
    },

    #[error("line {line}: name {name:?} contains the path separator {separator:?}")]
    SeparatorInName {
        line: usize,
        name: String,
        separator: String,
    },

    #[error("indent unit must be at least 1")]
    ZeroIndentUnit,
}

/// Failures of the path store backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Record encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Record not found: {0}")]
    RecordNotFound(NodeId),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Inconsistencies hit while walking a record up to the root
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("record {record} references ancestor {missing} which is not in the lookup table")]
    MissingAncestor { record: NodeId, missing: NodeId },

    #[error("record {record} has a parent cycle through {at}")]
    Cycle { record: NodeId, at: NodeId },
}

/// Top-level error returned by the query facade and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Listing source unavailable: {0}")]
    ListingUnavailable(String),

    #[error("Path {path} is shared by {} nodes: {candidates:?}", .candidates.len())]
    AmbiguousPath {
        path: String,
        candidates: Vec<NodeId>,
    },

    #[error("Output formatting error: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
