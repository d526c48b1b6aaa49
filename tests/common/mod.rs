//! Common test utilities

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary workspace root for a pipeline
pub fn workspace() -> TempDir {
    TempDir::new().unwrap()
}

/// Read the aggregate log of a pipeline directory
pub fn read_aggregate(root: &Path, directory: &str) -> String {
    fs::read_to_string(root.join(directory).join("LOG/task.log")).unwrap()
}

/// Count occurrences of a marker line in a log
pub fn count_markers(log: &str, marker: &str) -> usize {
    log.matches(marker).count()
}
