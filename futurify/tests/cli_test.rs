//! End-to-end tests of the binary surface: token classification, usage
//! errors, run modes, and configuration pickup.
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use futurify::test_utils::{read_source, write_source};
use predicates::prelude::*;
use tempfile::tempdir;

fn futurify() -> Command {
    Command::cargo_bin("futurify-bin").unwrap()
}

#[test]
fn no_arguments_is_a_usage_error() {
    futurify()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: futurify"));
}

#[test]
fn keywords_without_paths_is_a_usage_error() {
    futurify()
        .args(["+absolute_import"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: futurify"))
        .stderr(predicate::str::contains("recommended __future__ imports").not());
}

#[test]
fn paths_without_keywords_shows_recommendations() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "a.py", "import os\n");

    futurify()
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: futurify"))
        .stderr(predicate::str::contains("+absolute_import"))
        .stderr(predicate::str::contains("+unicode_literals"));
}

#[test]
fn nonexistent_path_fails_before_any_work() {
    let dir = tempdir().unwrap();
    let real = write_source(dir.path(), "real.py", "import os\n");

    futurify()
        .args(["--silent", "+division"])
        .arg(&real)
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("path not found"));

    // The existing file stays untouched: validation precedes processing.
    assert_eq!(read_source(&real), "import os\n");
}

#[test]
fn full_run_rewrites_a_tree() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "simple.py",
        "from __future__ import print_function, absolute_import\n\nprint('hello')\n",
    );
    write_source(
        dir.path(),
        "multiline.py",
        "import os\n\
         from __future__ import (print_function,\n\
         \x20                       division)\n\
         \n\
         import sys\n\
         from __future__ import absolute_import\n",
    );

    futurify()
        .args(["--silent", "+absolute_import", "-print_function"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        read_source(&dir.path().join("simple.py")),
        "from __future__ import absolute_import\n\nprint('hello')\n"
    );
    assert_eq!(
        read_source(&dir.path().join("multiline.py")),
        "import os\n\
         from __future__ import absolute_import, division\n\
         \n\
         import sys\n"
    );
}

#[test]
fn dry_run_reports_but_never_mutates() {
    let dir = tempdir().unwrap();
    let content = "from __future__ import print_function\n";
    let path = write_source(dir.path(), "a.py", content);

    futurify()
        .args(["--dry-run", "+absolute_import", "-print_function"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would add: absolute_import"))
        .stdout(predicate::str::contains("Would remove: print_function"));

    assert_eq!(read_source(&path), content);
}

#[test]
fn dry_run_is_quiet_for_files_already_current() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        "current.py",
        "from __future__ import division\n",
    );

    futurify()
        .args(["--dry-run", "+division"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would").not());
}

#[test]
fn silent_run_prints_nothing_on_stdout() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "a.py", "import os\n");

    futurify()
        .args(["--silent", "+division"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn json_mode_emits_a_machine_readable_run() {
    let dir = tempdir().unwrap();
    write_source(dir.path(), "a.py", "import os\n");

    let output = futurify()
        .args(["--json", "+division"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let run: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = run["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["added"][0], "division");
    assert_eq!(reports[0]["rewritten"], true);
    assert!(run["failures"].as_array().unwrap().is_empty());
}

#[test]
fn line_length_option_controls_wrapping() {
    let dir = tempdir().unwrap();
    let path = write_source(dir.path(), "a.py", "import os\n");

    futurify()
        .args([
            "--silent",
            "--line-length",
            "100",
            "+absolute_import",
            "+division",
            "+print_function",
            "+unicode_literals",
        ])
        .arg(dir.path())
        .assert()
        .success();

    // 83 characters: wraps at the default width, fits within 100.
    assert_eq!(
        read_source(&path).lines().next().unwrap(),
        "from __future__ import absolute_import, division, print_function, unicode_literals"
    );
}

#[test]
fn config_file_sets_the_canonical_width() {
    let dir = tempdir().unwrap();
    write_source(
        dir.path(),
        ".futurify.toml",
        "[futurify]\nline_length = 60\n",
    );
    let path = write_source(dir.path(), "a.py", "import os\n");

    futurify()
        .args([
            "--silent",
            "+absolute_import",
            "+division",
            "+print_function",
            "+unicode_literals",
        ])
        .arg(dir.path())
        .assert()
        .success();

    let content = read_source(&path);
    assert!(content.starts_with("from __future__ import ("));
    for line in content.lines().take_while(|l| !l.starts_with("import")) {
        assert!(line.len() <= 60, "over-wide line: {line:?}");
    }
}
