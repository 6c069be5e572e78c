//! Common test utilities

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temp directory holding one input CSV file
pub fn create_input(name: &str, content: impl AsRef<[u8]>) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join(name);
    fs::write(&input, content).expect("Failed to write input file");
    (temp_dir, input)
}

/// Read a CSV file back as rows of fields
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .expect("Failed to open output file");
    reader
        .records()
        .map(|r| {
            r.expect("Failed to parse output file")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Names of all files in a directory, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
