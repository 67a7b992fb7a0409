//! Listing node types

use crate::store::PathRecord;
use crate::types::NodeId;

/// One entry of a listing: a directory or a file, with the entries nested beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub id: NodeId,
    pub parent_id: NodeId,
    pub level: usize,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, id: NodeId, parent_id: NodeId, level: usize) -> Self {
        Self {
            name: name.into(),
            id,
            parent_id,
            level,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Flat record for this node alone
    pub fn to_record(&self) -> PathRecord {
        PathRecord::new(self.name.clone(), self.parent_id, self.id)
    }

    /// Visit this node and its descendants in pre-order (parent before children)
    pub fn walk_preorder<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Nodes without children, in depth-first child order
    pub fn leaves(&self) -> Vec<&Node> {
        let mut leaves = Vec::new();
        self.walk_preorder(&mut |node| {
            if node.is_leaf() {
                leaves.push(node);
            }
        });
        leaves
    }
}

/// A fully linked tree produced from one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTree {
    pub root: Node,
    /// Nodes created while parsing, including any under a replaced root
    pub node_count: usize,
}

impl ListingTree {
    /// Flatten into store records in pre-order
    pub fn records(&self) -> Vec<PathRecord> {
        let mut records = Vec::new();
        self.root.walk_preorder(&mut |node| records.push(node.to_record()));
        records
    }
}
