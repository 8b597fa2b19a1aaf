//! Terminal output formatting for reports, summaries, and progress.
//!
//! Everything here writes through an injected `Write` so tests can capture
//! output without touching process-wide streams.

use crate::error::FuturifyError;
use crate::rewriter::FileReport;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// How much human-readable output a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Failures only.
    Silent,
    /// Per-file change reports and the run summary.
    Normal,
    /// Everything, plus per-file processing detail on stderr.
    Verbose,
}

impl Verbosity {
    /// Resolves the `--verbose`/`--silent` pair; `--silent` wins.
    #[must_use]
    pub fn from_flags(verbose: bool, silent: bool) -> Self {
        if silent {
            Self::Silent
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// Prints one file's would-be changes in preview mode.
///
/// A file with nothing to add or remove produces no output at all.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_preview(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    if report.is_noop() {
        return Ok(());
    }
    writeln!(
        writer,
        "{} {}",
        "Changes to".bold(),
        report.path.display()
    )?;
    if !report.removed.is_empty() {
        writeln!(
            writer,
            "  Would remove: {}",
            report.removed.join(", ").red()
        )?;
    }
    if !report.added.is_empty() {
        writeln!(writer, "  Would add: {}", report.added.join(", ").green())?;
    }
    Ok(())
}

/// Prints one rewritten file's flag changes.
///
/// Files whose flag set did not change are skipped; canonicalizing the
/// statement's formatting alone is not worth a line of output.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_rewrite(writer: &mut impl Write, report: &FileReport) -> std::io::Result<()> {
    if report.is_noop() {
        return Ok(());
    }
    let mut changes: Vec<String> = Vec::new();
    changes.extend(report.added.iter().map(|f| format!("+{f}").green().to_string()));
    changes.extend(report.removed.iter().map(|f| format!("-{f}").red().to_string()));
    writeln!(
        writer,
        "{} {} ({})",
        "Updated".bold(),
        report.path.display(),
        changes.join(", ")
    )?;
    Ok(())
}

/// Prints per-file failures.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_failures(writer: &mut impl Write, failures: &[&FuturifyError]) -> std::io::Result<()> {
    for failure in failures {
        writeln!(writer, "{} {failure}", "Failed:".red().bold())?;
    }
    Ok(())
}

/// Prints the end-of-run summary line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary(
    writer: &mut impl Write,
    dry_run: bool,
    updated: usize,
    current: usize,
    failed: usize,
) -> std::io::Result<()> {
    let verb = if dry_run { "would change" } else { "updated" };
    if failed > 0 {
        writeln!(
            writer,
            "\n[SUMMARY] {updated} files {verb}, {current} already current, {} failed",
            failed.to_string().red().bold()
        )?;
    } else {
        writeln!(
            writer,
            "\n[SUMMARY] {updated} files {verb}, {current} already current"
        )?;
    }
    Ok(())
}

/// Machine-readable run outcome for `--json` mode.
#[derive(Debug, Serialize)]
pub struct JsonRun<'a> {
    /// Per-file reports, in path order.
    pub reports: &'a [FileReport],
    /// Per-file failures rendered as messages.
    pub failures: Vec<JsonFailure>,
}

/// One per-file failure in `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonFailure {
    /// Display form of the failing path, when the error carries one.
    pub path: Option<String>,
    /// Human-readable error message.
    pub error: String,
}

impl From<&FuturifyError> for JsonFailure {
    fn from(error: &FuturifyError) -> Self {
        let path = match error {
            FuturifyError::PathNotFound { path } | FuturifyError::Io { path, .. } => {
                Some(path.display().to_string())
            }
            FuturifyError::Usage { .. } => None,
        };
        Self {
            path,
            error: error.to_string(),
        }
    }
}

/// Prints the whole run as a single JSON document.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json(
    writer: &mut impl Write,
    reports: &[FileReport],
    failures: &[&FuturifyError],
) -> anyhow::Result<()> {
    let run = JsonRun {
        reports,
        failures: failures.iter().map(|&e| JsonFailure::from(e)).collect(),
    };
    writeln!(writer, "{}", serde_json::to_string_pretty(&run)?)?;
    Ok(())
}

/// Create and return a spinner shown while a tree is being processed.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_spinner() -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("futurify rewriting imports…");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
