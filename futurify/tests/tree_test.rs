//! Tree-walk behavior: recursion, extension filtering, exclusions, and the
//! single-file root case.
#![allow(clippy::unwrap_used)]

use futurify::error::FuturifyError;
use futurify::rewriter::RewriteOptions;
use futurify::test_utils::{read_source, write_source};
use futurify::walker::process_tree;
use rustc_hash::FxHashSet;
use std::path::Path;
use tempfile::tempdir;

fn add_division() -> RewriteOptions {
    let mut add = FxHashSet::default();
    add.insert("division".to_owned());
    RewriteOptions {
        add,
        ..RewriteOptions::default()
    }
}

#[test]
fn rewrites_every_python_file_recursively() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "top.py", "import os\n");
    write_source(dir.path(), "pkg/inner.py", "import sys\n");
    write_source(dir.path(), "pkg/deep/leaf.py", "x = 1\n");

    let outcomes = process_tree(dir.path(), &add_division(), &[]).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(Result::is_ok));

    for name in ["top.py", "pkg/inner.py", "pkg/deep/leaf.py"] {
        let content = read_source(&dir.path().join(name));
        assert!(
            content.starts_with("from __future__ import division\n"),
            "{name} was not rewritten"
        );
    }
}

#[test]
fn reports_come_back_sorted_by_path() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "zeta.py", "x = 1\n");
    write_source(dir.path(), "alpha.py", "x = 1\n");
    write_source(dir.path(), "mid/beta.py", "x = 1\n");

    let outcomes = process_tree(dir.path(), &add_division(), &[]).unwrap();
    let paths: Vec<_> = outcomes
        .iter()
        .map(|o| o.as_ref().unwrap().path.clone())
        .collect();
    let mut sorted = paths.clone();
    sorted.sort_unstable();
    assert_eq!(paths, sorted);
}

#[test]
fn leaves_non_python_files_untouched() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "code.py", "import os\n");
    let notes = write_source(dir.path(), "notes.txt", "import os\n");
    let pyc = write_source(dir.path(), "code.pyc", "binaryish\n");

    process_tree(dir.path(), &add_division(), &[]).unwrap();

    assert_eq!(read_source(&notes), "import os\n");
    assert_eq!(read_source(&pyc), "binaryish\n");
}

#[test]
fn excluded_folders_are_not_entered() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "src/app.py", "import os\n");
    let vendored = write_source(dir.path(), "vendor/lib.py", "import os\n");

    process_tree(dir.path(), &add_division(), &["vendor".to_owned()]).unwrap();

    assert_eq!(read_source(&vendored), "import os\n");
    assert!(read_source(&dir.path().join("src/app.py")).starts_with("from __future__"));
}

#[test]
fn single_file_root_is_processed_whatever_its_name() {
    let dir = tempdir().unwrap();
    // The extension filter applies to directory walks only.
    let path = write_source(dir.path(), "script", "import os\n");

    let outcomes = process_tree(&path, &add_division(), &[]).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(read_source(&path).starts_with("from __future__ import division\n"));
}

#[test]
fn dry_run_walk_touches_nothing() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "a.py", "import os\n");
    write_source(dir.path(), "b/c.py", "from __future__ import division\n");

    let options = RewriteOptions {
        dry_run: true,
        ..add_division()
    };
    let outcomes = process_tree(dir.path(), &options, &[]).unwrap();

    assert_eq!(read_source(&dir.path().join("a.py")), "import os\n");
    assert_eq!(
        read_source(&dir.path().join("b/c.py")),
        "from __future__ import division\n"
    );
    // One file would gain the flag, the other already has it.
    let reports: Vec<_> = outcomes.into_iter().map(Result::unwrap).collect();
    assert_eq!(reports.iter().filter(|r| !r.is_noop()).count(), 1);
}

#[test]
fn missing_root_reports_path_not_found() {
    let err = process_tree(Path::new("/no/such/tree"), &add_division(), &[]).unwrap_err();
    assert!(matches!(err, FuturifyError::PathNotFound { .. }));
}
