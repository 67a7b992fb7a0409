use pathindex::tree::{Node, TreeBuilder};
use pathindex::{ApiError, IndexOptions, ListingError, NodeId, PathIndex, NO_PARENT};
use proptest::prelude::*;

/// Generated listing: the text plus (id, expected full path) for every line.
/// Names come from a tiny alphabet, so siblings often share a name.
#[derive(Debug)]
struct Listing {
    text: String,
    paths: Vec<(NodeId, String)>,
}

fn listing_strategy() -> impl Strategy<Value = Listing> {
    prop::collection::vec((any::<u8>(), "[a-c][a-c.]{0,1}"), 0..40).prop_map(|lines| {
        let mut text = String::from("root\n");
        let mut paths = vec![(0, "root".to_string())];
        let mut open: Vec<String> = vec!["root".to_string()];

        for (raw, name) in lines {
            let level = 1 + (raw as usize % open.len());
            open.truncate(level);
            open.push(name.clone());
            text.push_str(&"  ".repeat(level));
            text.push_str(&name);
            text.push('\n');
            paths.push((paths.len() as NodeId, open.join("\\")));
        }
        Listing { text, paths }
    })
}

fn check_levels(node: &Node) -> usize {
    let mut count = 1;
    for child in &node.children {
        assert_eq!(child.level, node.level + 1);
        assert_eq!(child.parent_id, node.id);
        count += check_levels(child);
    }
    count
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn levels_follow_parents_with_single_root(listing in listing_strategy()) {
        let tree = TreeBuilder::new(2).build(&listing.text).unwrap();
        prop_assert_eq!(tree.root.level, 0);
        prop_assert_eq!(tree.root.parent_id, NO_PARENT);
        prop_assert_eq!(check_levels(&tree.root), listing.paths.len());

        let roots = tree.records().iter().filter(|r| r.parent_id == NO_PARENT).count();
        prop_assert_eq!(roots, 1);
    }

    #[test]
    fn rebuild_is_deterministic(listing in listing_strategy()) {
        let builder = TreeBuilder::new(2);
        let first = builder.build(&listing.text).unwrap().records();
        let second = builder.build(&listing.text).unwrap().records();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn returned_paths_locate_their_nodes(listing in listing_strategy()) {
        let options = IndexOptions { indent_unit: 2, ..IndexOptions::default() };
        let index = PathIndex::in_memory(options);
        index.initialize_from_str(&listing.text).unwrap();

        for (id, expected) in &listing.paths {
            let name = expected.rsplit('\\').next().unwrap();
            let results = index.find(name).unwrap();
            prop_assert!(results.contains(expected), "{:?} missing from {:?}", expected, results);
            for path in &results {
                let last = path.rsplit('\\').next().unwrap();
                prop_assert!(last.starts_with(name));
            }

            let sharing: Vec<NodeId> = listing
                .paths
                .iter()
                .filter(|(_, path)| path == expected)
                .map(|(id, _)| *id)
                .collect();
            match index.locate(expected) {
                Ok(found) => {
                    prop_assert_eq!(found, Some(*id));
                    prop_assert_eq!(sharing.len(), 1);
                }
                Err(ApiError::AmbiguousPath { mut candidates, .. }) => {
                    candidates.sort_unstable();
                    prop_assert_eq!(candidates, sharing);
                }
                Err(e) => prop_assert!(false, "locate failed: {}", e),
            }
        }
    }

    #[test]
    fn names_holding_the_separator_are_rejected(
        listing in listing_strategy(),
        stem in "[a-c]{1,2}",
    ) {
        let text = format!("{}  {}\\x\n", listing.text, stem);
        let err = TreeBuilder::new(2).build(&text).unwrap_err();
        prop_assert!(
            matches!(err, ListingError::SeparatorInName { line, .. } if line == listing.paths.len() + 1),
            "unexpected error {:?}",
            err
        );
    }
}
