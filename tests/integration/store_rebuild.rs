use pathindex::store::persistence::SledPathStore;
use pathindex::tree::TreeBuilder;
use pathindex::{ApiError, IndexOptions, PathIndex, PathStore, NO_MATCHES, NO_PARENT};
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::support::{fixture_path, fixture_text};

fn sled_index(dir: &TempDir) -> (Arc<SledPathStore>, PathIndex) {
    let store = Arc::new(SledPathStore::open(&dir.path().join("store")).unwrap());
    let index = PathIndex::new(
        store.clone(),
        IndexOptions::default().with_listing_path(fixture_path()),
    );
    (store, index)
}

#[test]
fn rebuild_writes_one_record_per_line() {
    let temp = TempDir::new().unwrap();
    let (store, index) = sled_index(&temp);
    let metadata = index.initialize().unwrap();

    assert_eq!(metadata.node_count, 20);
    assert_eq!(store.len().unwrap(), 20);
    let root = store.get(0).unwrap().unwrap();
    assert_eq!((root.name.as_str(), root.parent_id), ("C:", NO_PARENT));
    assert_eq!(store.children_of(NO_PARENT).unwrap().len(), 1);
}

#[test]
fn rebuilding_twice_yields_identical_records() {
    let temp = TempDir::new().unwrap();
    let (store, index) = sled_index(&temp);

    let first_meta = index.initialize().unwrap();
    let first: Vec<_> = (0..20).map(|id| store.get(id).unwrap()).collect();
    let second_meta = index.initialize().unwrap();
    let second: Vec<_> = (0..20).map(|id| store.get(id).unwrap()).collect();

    assert_eq!(first, second);
    assert_eq!(first_meta.listing_digest, second_meta.listing_digest);
    assert_eq!(store.len().unwrap(), 20);
}

#[test]
fn records_match_builder_preorder() {
    let temp = TempDir::new().unwrap();
    let (store, index) = sled_index(&temp);
    index.initialize().unwrap();

    let tree = TreeBuilder::default().build(&fixture_text()).unwrap();
    for record in tree.records() {
        assert_eq!(store.get(record.id).unwrap(), Some(record));
    }
}

#[test]
fn index_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let (_, index) = sled_index(&temp);
        index.initialize().unwrap();
    }
    let (_, index) = sled_index(&temp);
    assert!(index.status().unwrap().initialized);
    assert_eq!(index.find("Letter").unwrap(), vec!["C:\\Documents\\Works\\Letter.doc"]);
}

#[test]
fn failed_rebuild_leaves_previous_contents() {
    let temp = TempDir::new().unwrap();
    let (store, index) = sled_index(&temp);
    index.initialize().unwrap();

    let err = index.initialize_from_str("D:\n              skipped\n").unwrap_err();
    assert!(matches!(err, ApiError::Listing(_)));
    assert_eq!(store.len().unwrap(), 20);
    assert_eq!(index.find("Temp").unwrap(), vec!["C:\\Temp"]);
}

#[test]
fn empty_listing_empties_the_store() {
    let temp = TempDir::new().unwrap();
    let (store, index) = sled_index(&temp);
    index.initialize().unwrap();

    index.initialize_from_str("   \n\n").unwrap();
    assert_eq!(store.len().unwrap(), 0);
    assert_eq!(index.find("C").unwrap(), vec![NO_MATCHES]);
    assert!(index.status().unwrap().initialized);
}

#[test]
fn concurrent_queries_never_see_partial_rebuild() {
    let temp = TempDir::new().unwrap();
    let (_, index) = sled_index(&temp);
    index.initialize().unwrap();
    let index = Arc::new(index);

    let writer = {
        let index = Arc::clone(&index);
        std::thread::spawn(move || {
            for _ in 0..10 {
                index.initialize().unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    let paths = index.find("Image").unwrap();
                    assert_eq!(paths.len(), 4);
                    assert_eq!(paths[3], "C:\\Documents\\Images");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
