//! pathindex: indented directory listings as a searchable parent-pointer tree
//!
//! A listing such as
//!
//! ```text
//! C:
//!        Documents
//!               Images
//!                      Image1.jpg
//! ```
//!
//! is parsed into a tree (one node per line, nesting taken from indentation), flattened into a
//! `(name, parent_id, id)` store, and searched by name prefix. Each query returns the full
//! path of every matching leaf followed by every matched directory that has matches beneath it.

pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, ListingError, RenderError, StorageError};
pub use query::{IndexOptions, IndexStatus, PathIndex};
pub use store::{CaseMode, MemoryPathStore, PathRecord, PathStore};
pub use types::{NodeId, NO_MATCHES, NO_PARENT};
