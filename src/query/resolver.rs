//! Match resolution
//!
//! Finds records whose name starts with a fragment, pulls in each match's ancestry, and
//! rebuilds the minimal sub-tree covering those records. Leaves of that sub-tree are reported
//! by their own paths; matches that still have matched descendants are reported after them.

use crate::error::StorageError;
use crate::query::render::TreeDict;
use crate::store::{CaseMode, PathRecord, PathStore};
use crate::tree::node::Node;
use crate::types::{NodeId, NO_PARENT};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Outcome of resolving one fragment
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Records whose name matched, in store order
    pub initial_matches: Vec<PathRecord>,
    /// Matches plus every record needed to reach the root from them
    pub tree_dict: TreeDict,
    /// Sub-tree rebuilt from `tree_dict`, absent when nothing matched
    pub subtree: Option<Node>,
}

impl Resolution {
    /// Leaves of the reconstructed sub-tree in depth-first order
    pub fn leaves(&self) -> Vec<&Node> {
        self.subtree
            .as_ref()
            .map(|root| root.leaves())
            .unwrap_or_default()
    }

    /// Matches that are not leaves of the sub-tree, in store order
    pub fn non_leaf_matches(&self) -> Vec<&PathRecord> {
        let leaf_ids: HashSet<NodeId> = self.leaves().iter().map(|n| n.id).collect();
        self.initial_matches
            .iter()
            .filter(|r| !leaf_ids.contains(&r.id))
            .collect()
    }

    /// Records to render: sub-tree leaves first, then non-leaf matches
    pub fn ordered_records(&self) -> Vec<&PathRecord> {
        let mut ordered: Vec<&PathRecord> = self
            .leaves()
            .iter()
            .filter_map(|leaf| self.tree_dict.get(&leaf.id))
            .collect();
        ordered.extend(self.non_leaf_matches());
        ordered
    }
}

/// Resolves fragments against a path store
pub struct MatchResolver<'a> {
    store: &'a dyn PathStore,
    case: CaseMode,
}

impl<'a> MatchResolver<'a> {
    pub fn new(store: &'a dyn PathStore, case: CaseMode) -> Self {
        Self { store, case }
    }

    pub fn resolve(&self, fragment: &str) -> Result<Resolution, StorageError> {
        let initial_matches = self.store.named_like(fragment, self.case)?;
        if initial_matches.is_empty() {
            debug!(fragment, "No records matched");
            return Ok(Resolution::default());
        }

        let matched: HashSet<NodeId> = initial_matches.iter().map(|r| r.id).collect();
        let parents: BTreeSet<NodeId> = initial_matches
            .iter()
            .map(|r| r.parent_id)
            .filter(|parent| *parent != NO_PARENT && !matched.contains(parent))
            .collect();

        let mut lineage: BTreeMap<NodeId, PathRecord> = initial_matches
            .iter()
            .map(|r| (r.id, r.clone()))
            .collect();
        let fetched = self.collect_lineage(&parents, &mut lineage)?;

        let subtree = reconstruct(lineage.values());
        debug!(
            fragment,
            matches = initial_matches.len(),
            parents = parents.len(),
            records = lineage.len(),
            fetched,
            "Resolved fragment"
        );

        Ok(Resolution {
            initial_matches,
            tree_dict: lineage.into_iter().collect(),
            subtree,
        })
    }

    /// Pull every ancestor of `parents` into `lineage`, one store batch per level.
    ///
    /// Only ids not already in `lineage` are requested, so chains sharing a prefix fetch it
    /// once. A requested id the store lacks is logged and its chain ends there. Returns the
    /// number of records fetched.
    fn collect_lineage(
        &self,
        parents: &BTreeSet<NodeId>,
        lineage: &mut BTreeMap<NodeId, PathRecord>,
    ) -> Result<usize, StorageError> {
        let mut pending: Vec<NodeId> = parents
            .iter()
            .copied()
            .filter(|id| !lineage.contains_key(id))
            .collect();
        let mut fetched = 0;

        while !pending.is_empty() {
            let records = self.store.get_many(&pending)?;
            fetched += records.len();

            let found: HashSet<NodeId> = records.iter().map(|r| r.id).collect();
            for missing in pending.iter().filter(|id| !found.contains(id)) {
                warn!(missing, "Ancestor chain is broken; skipping it");
            }

            let mut next = BTreeSet::new();
            for record in records {
                if record.parent_id != NO_PARENT {
                    next.insert(record.parent_id);
                }
                lineage.insert(record.id, record);
            }
            pending = next
                .into_iter()
                .filter(|id| !lineage.contains_key(id))
                .collect();
        }
        Ok(fetched)
    }
}

/// Rebuild a node tree from records given in id order.
///
/// Starts at the record with no parent and attaches records by `parent_id`; records that
/// cannot reach that root are left out.
pub fn reconstruct<'r>(records: impl IntoIterator<Item = &'r PathRecord>) -> Option<Node> {
    let mut roots = Vec::new();
    let mut by_parent: HashMap<NodeId, Vec<&PathRecord>> = HashMap::new();
    for record in records {
        if record.is_root() {
            roots.push(record);
        } else {
            by_parent.entry(record.parent_id).or_default().push(record);
        }
    }

    let root = roots.first()?;
    if roots.len() > 1 {
        warn!(roots = roots.len(), "Several root records; using the first");
    }

    let mut tree = Node::new(root.name.clone(), root.id, NO_PARENT, 0);
    attach_children(&mut tree, &by_parent);
    Some(tree)
}

fn attach_children(node: &mut Node, by_parent: &HashMap<NodeId, Vec<&PathRecord>>) {
    let Some(children) = by_parent.get(&node.id) else {
        return;
    };
    for record in children {
        let mut child = Node::new(record.name.clone(), record.id, node.id, node.level + 1);
        attach_children(&mut child, by_parent);
        node.children.push(child);
    }
}
