//! Helpers for building fixture source trees in tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` to `dir/name`, creating parent directories as needed,
/// and returns the full path.
///
/// # Panics
///
/// Panics on I/O failure; fixtures that cannot be written make the test
/// meaningless anyway.
#[allow(clippy::expect_used)]
pub fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create fixture directory");
    }
    fs::write(&path, content).expect("failed to write fixture file");
    path
}

/// Reads `path` back as a string.
///
/// # Panics
///
/// Panics on I/O failure.
#[allow(clippy::expect_used)]
pub fn read_source(path: &Path) -> String {
    fs::read_to_string(path).expect("failed to read fixture file")
}
