//! Per-file merge and rewrite of `__future__` imports.
//!
//! Strategy, per file: scan once to gather every import statement and its
//! line span, union their flags into one working set, apply the requested
//! additions and removals, then replace the first statement with the
//! canonical form and delete the rest. Preview mode stops after the scan and
//! only reports what would change.

use crate::constants::{DEFAULT_LINE_LENGTH, LEADER};
use crate::error::FuturifyError;
use crate::formatter::canonical_statement;
use crate::scanner::Scanner;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Flag changes and run mode shared by every file of an invocation.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Flags to add to each file's merged set.
    pub add: FxHashSet<String>,
    /// Flags to remove from each file's merged set.
    pub remove: FxHashSet<String>,
    /// Report would-be changes without touching any file.
    pub dry_run: bool,
    /// Literal prefix introducing an import statement.
    pub leader: String,
    /// Maximum width of canonical output lines.
    pub line_length: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            add: FxHashSet::default(),
            remove: FxHashSet::default(),
            dry_run: false,
            leader: LEADER.to_owned(),
            line_length: DEFAULT_LINE_LENGTH,
        }
    }
}

/// What processing one file did (or, in preview mode, would do).
///
/// Returned from [`process_file`] instead of being logged, so callers decide
/// how to surface it and tests never have to capture process-wide streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The file this report describes.
    pub path: PathBuf,
    /// Flags not previously present, sorted.
    pub added: Vec<String>,
    /// Previously present flags that the request drops, sorted.
    pub removed: Vec<String>,
    /// Whether the file was written back. Always false in preview mode.
    pub rewritten: bool,
}

impl FileReport {
    /// True when the request neither adds nor removes any flag.
    ///
    /// The file may still have been rewritten into canonical form.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Which original lines to drop and what to insert in their place.
///
/// Ephemeral: computed from one scan, applied to the same file content,
/// never persisted.
struct RewritePlan {
    excluded_lines: FxHashSet<usize>,
    insertion_line: usize,
    new_text: Option<String>,
}

impl RewritePlan {
    fn new(spans: &[(usize, usize)], new_text: Option<String>) -> Self {
        let mut excluded_lines = FxHashSet::default();
        for &(start, end) in spans {
            excluded_lines.extend(start..=end);
        }
        // The canonical statement lands where the first original statement
        // began; a file with none gets it at the very top.
        let insertion_line = spans.first().map_or(1, |&(start, _)| start);
        Self {
            excluded_lines,
            insertion_line,
            new_text,
        }
    }

    /// Splices the plan into `source`, preserving every non-excluded line
    /// byte-for-byte (including the presence or absence of a final newline).
    fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut inserted = false;

        for (index, line) in source.split_inclusive('\n').enumerate() {
            let line_no = index + 1;
            if line_no == self.insertion_line {
                self.insert_into(&mut out);
                inserted = true;
            }
            if !self.excluded_lines.contains(&line_no) {
                out.push_str(line);
            }
        }
        // Empty file, or insertion point past the last line.
        if !inserted {
            self.insert_into(&mut out);
        }
        out
    }

    fn insert_into(&self, out: &mut String) {
        if let Some(text) = &self.new_text {
            out.push_str(text);
            out.push('\n');
        }
    }
}

/// Updates the `__future__` imports in a single file.
///
/// Scans the file, merges the flags of every statement found with the
/// requested changes, and either reports the would-be diff (`dry_run`) or
/// rewrites the file in place. The rewrite replaces the whole file through a
/// sibling temporary file and an atomic rename, so a crash never leaves it
/// half-written.
///
/// A merge that empties the flag set deletes every statement and inserts
/// nothing; a file with no statement and a non-empty target set gains one at
/// the top.
pub fn process_file(path: &Path, options: &RewriteOptions) -> Result<FileReport, FuturifyError> {
    let source = fs::read_to_string(path).map_err(|e| FuturifyError::io(path, e))?;

    let mut found = FxHashSet::default();
    let mut spans = Vec::new();
    for import in Scanner::new(source.lines(), &options.leader) {
        found.extend(import.flags.iter().cloned());
        spans.push((import.start_line, import.end_line));
    }

    let mut added: Vec<String> = options.add.difference(&found).cloned().collect();
    let mut removed: Vec<String> = found.intersection(&options.remove).cloned().collect();
    added.sort_unstable();
    removed.sort_unstable();

    if options.dry_run {
        return Ok(FileReport {
            path: path.to_path_buf(),
            added,
            removed,
            rewritten: false,
        });
    }

    let mut target = found;
    target.extend(options.add.iter().cloned());
    target.retain(|flag| !options.remove.contains(flag));

    let new_text = if target.is_empty() {
        None
    } else {
        Some(canonical_statement(
            &target,
            &options.leader,
            options.line_length,
        ))
    };

    let rewritten = RewritePlan::new(&spans, new_text).apply(&source);
    write_replacing(path, &rewritten)?;

    Ok(FileReport {
        path: path.to_path_buf(),
        added,
        removed,
        rewritten: true,
    })
}

/// Replaces `path`'s content atomically via a temp file in the same directory.
fn write_replacing(path: &Path, content: &str) -> Result<(), FuturifyError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| FuturifyError::io(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| FuturifyError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| FuturifyError::io(path, e.error))?;
    Ok(())
}
