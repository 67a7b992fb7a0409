//! Full path rendering from a record and its reconstructed ancestry.

use crate::error::RenderError;
use crate::store::PathRecord;
use crate::types::{NodeId, DEFAULT_SEPARATOR, NO_PARENT};
use std::collections::HashMap;

/// Lookup table of the records relevant to one query: id -> record
pub type TreeDict = HashMap<NodeId, PathRecord>;

/// Joins ancestor names, root first, with a fixed separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRenderer {
    separator: String,
}

impl Default for PathRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl PathRenderer {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Render the full path of `record`, walking parents through `tree_dict`.
    ///
    /// Fails instead of truncating when an ancestor is absent or the parents loop.
    pub fn render(&self, record: &PathRecord, tree_dict: &TreeDict) -> Result<String, RenderError> {
        let mut segments = vec![record.name.as_str()];
        let mut parent = record.parent_id;

        while parent != NO_PARENT {
            if segments.len() > tree_dict.len() {
                return Err(RenderError::Cycle {
                    record: record.id,
                    at: parent,
                });
            }
            let ancestor = tree_dict.get(&parent).ok_or(RenderError::MissingAncestor {
                record: record.id,
                missing: parent,
            })?;
            segments.push(ancestor.name.as_str());
            parent = ancestor.parent_id;
        }

        segments.reverse();
        Ok(segments.join(&self.separator))
    }

    /// Split a rendered path back into its segments
    pub fn split<'a>(&self, path: &'a str) -> Vec<&'a str> {
        if self.separator.is_empty() {
            return vec![path];
        }
        path.split(self.separator.as_str()).collect()
    }
}
