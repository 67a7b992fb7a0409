//! Tree builder: turns an indentation listing into a linked tree
//!
//! Each non-blank line is one node. The count of leading whitespace characters divided by the
//! indent unit gives the node's level; the parent is the nearest open node one level up.
//! Names may not contain the path separator, since rendered paths are split on it.

use crate::error::ListingError;
use crate::tree::node::{ListingTree, Node};
use crate::types::{NodeId, DEFAULT_INDENT_UNIT, DEFAULT_SEPARATOR, NO_PARENT};
use tracing::{debug, warn};

/// Builds a [`ListingTree`] from listing text
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    indent_unit: usize,
    separator: String,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_UNIT)
    }
}

impl TreeBuilder {
    pub fn new(indent_unit: usize) -> Self {
        Self {
            indent_unit,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Separator that rendered paths will use; names containing it are rejected
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Depth of a raw line, root being 0
    pub fn level_of(&self, line: &str) -> usize {
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        indent / self.indent_unit.max(1)
    }

    /// Parse the listing in a single pass.
    ///
    /// Open ancestors are kept on a stack where `stack[i]` is the open node at level `i`. A new
    /// line at level `l` closes everything at level `l` and deeper, then becomes a child of
    /// `stack[l - 1]`. A line more than one level below the deepest open node is rejected.
    pub fn build(&self, text: &str) -> Result<ListingTree, ListingError> {
        if self.indent_unit == 0 {
            return Err(ListingError::ZeroIndentUnit);
        }

        let mut stack: Vec<Node> = Vec::new();
        let mut next_id: NodeId = 0;

        for (index, line) in text.lines().enumerate() {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            if !self.separator.is_empty() && name.contains(self.separator.as_str()) {
                return Err(ListingError::SeparatorInName {
                    line: index + 1,
                    name: name.to_string(),
                    separator: self.separator.clone(),
                });
            }
            let level = self.level_of(line);

            if level > stack.len() {
                return Err(ListingError::LevelJump {
                    line: index + 1,
                    level,
                    max_level: stack.len(),
                });
            }

            if level == 0 {
                if let Some(previous) = close_levels(&mut stack, 0) {
                    warn!(
                        line = index + 1,
                        replaced = %previous.name,
                        "Listing declares another root; replacing the previous one"
                    );
                }
            } else {
                close_levels(&mut stack, level);
            }

            let parent_id = stack.last().map(|parent| parent.id).unwrap_or(NO_PARENT);
            stack.push(Node::new(name, next_id, parent_id, level));
            next_id += 1;
        }

        let root = close_levels(&mut stack, 0).ok_or(ListingError::Empty)?;
        debug!(nodes = next_id, root = %root.name, "Built listing tree");
        Ok(ListingTree {
            root,
            node_count: next_id as usize,
        })
    }
}

/// Pop open nodes until `depth` remain, attaching each to the node below it.
/// Returns the root when the stack is emptied.
fn close_levels(stack: &mut Vec<Node>, depth: usize) -> Option<Node> {
    while stack.len() > depth {
        let closed = stack.pop()?;
        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => return Some(closed),
        }
    }
    None
}
