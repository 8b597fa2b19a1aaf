//! Directory traversal dispatching the rewriter over Python source trees.

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, PYTHON_EXTENSION};
use crate::error::FuturifyError;
use crate::rewriter::{process_file, FileReport, RewriteOptions};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Checks if a folder name matches an exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    for exclude in excludes {
        if exclude.starts_with("*.") {
            if name.ends_with(&exclude[1..]) {
                return true;
            }
        } else if name == exclude {
            return true;
        }
    }
    false
}

/// Collects every `.py` file under `root`, honoring gitignore files and
/// skipping excluded folders at traversal time.
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
///
/// Excluded directories are pruned before descent, so a `node_modules` or
/// `.venv` tree is never entered at all.
#[must_use]
pub fn collect_python_files(root: &Path, exclude: &[String]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    // Merge user excludes with the built-in defaults.
    let mut all_excludes: Vec<String> = exclude.to_vec();
    all_excludes.extend(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()));

    let excludes_for_filter = all_excludes;
    let root_for_filter = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .hidden(false) // Don't skip hidden files (we handle that with defaults)
        .git_ignore(true) // Respect .gitignore files
        .git_global(true) // Respect global gitignore
        .git_exclude(true) // Respect .git/info/exclude
        .filter_entry(move |entry| {
            // Always allow the root directory
            if entry.path() == root_for_filter {
                return true;
            }

            // Only filter directories - files are filtered by extension below
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }

            if let Some(name) = entry.file_name().to_str() {
                if is_excluded(name, &excludes_for_filter) {
                    return false;
                }
            }

            true
        })
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }
        if path
            .extension()
            .is_some_and(|ext| ext == PYTHON_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }
    files
}

/// Updates the `__future__` imports under one root path.
///
/// A root that is not a directory is treated as exactly one target file,
/// whatever its extension. A directory is walked recursively and every `.py`
/// file is processed; everything else is left untouched.
///
/// Files are independent, so they are processed in parallel; results come
/// back sorted by path, making output order deterministic regardless of
/// scheduling. A file that fails to read or write yields its own `Err` entry
/// and does not stop the rest of the tree.
///
/// # Errors
///
/// Returns [`FuturifyError::PathNotFound`] if `root` does not exist. Per-file
/// I/O failures are reported inside the result vector, not as a top-level
/// error.
pub fn process_tree(
    root: &Path,
    options: &RewriteOptions,
    exclude: &[String],
) -> Result<Vec<Result<FileReport, FuturifyError>>, FuturifyError> {
    if !root.exists() {
        return Err(FuturifyError::PathNotFound {
            path: root.to_path_buf(),
        });
    }

    if !root.is_dir() {
        return Ok(vec![process_file(root, options)]);
    }

    let mut files = collect_python_files(root, exclude);
    files.sort_unstable();

    Ok(files
        .par_iter()
        .map(|path| process_file(path, options))
        .collect())
}
