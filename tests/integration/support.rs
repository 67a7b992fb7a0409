use pathindex::{IndexOptions, PathIndex};
use std::path::PathBuf;

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("file_structure.txt")
}

pub fn fixture_text() -> String {
    std::fs::read_to_string(fixture_path()).unwrap()
}

/// Memory-backed index initialised from the fixture listing
pub fn fixture_index(options: IndexOptions) -> PathIndex {
    let index = PathIndex::in_memory(options.with_listing_path(fixture_path()));
    index.initialize().unwrap();
    index
}
