//! Test fixture loading utilities

use std::path::PathBuf;

use imbib_search::{parse_snapshot, Reference};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load the shared reference library snapshot
pub fn load_library() -> Vec<Reference> {
    parse_snapshot(&load_fixture("references.json")).expect("fixture snapshot should parse")
}
