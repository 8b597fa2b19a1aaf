//! Shared program entry point.
//!
//! Both binaries delegate here so behavior stays identical across entry
//! points. The function parses arguments, resolves configuration, fans the
//! rewriter out over every target path, and renders the collected reports.

use crate::cli::{Cli, Request};
use crate::config::Config;
use crate::constants::{DEFAULT_LINE_LENGTH, LEADER, RECOMMENDATIONS};
use crate::error::FuturifyError;
use crate::output::{self, Verbosity};
use crate::rewriter::{FileReport, RewriteOptions};
use crate::walker::process_tree;
use anyhow::Result;
use clap::Parser;

/// Runs futurify with the given arguments.
///
/// # Errors
///
/// Returns an error only on output failure; every expected problem is
/// rendered and turned into the exit code.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run futurify with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error only on output failure; every expected problem is
/// rendered and turned into the exit code.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["futurify".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    let request = match cli.classify_tokens() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("futurify: {e}");
            return Ok(1);
        }
    };

    if request.paths.is_empty() || (request.add.is_empty() && request.remove.is_empty()) {
        eprintln!("{}", usage_message(&request));
        return Ok(1);
    }

    let verbosity = Verbosity::from_flags(request.verbose, request.silent);

    // Load config from the first target path's directory (or an ancestor).
    let config = Config::load_from_path(&request.paths[0]);
    let line_length = request
        .line_length
        .or(config.futurify.line_length)
        .unwrap_or(DEFAULT_LINE_LENGTH);
    let leader = config
        .futurify
        .leader
        .clone()
        .unwrap_or_else(|| LEADER.to_owned());
    let exclude_folders = config.futurify.exclude_folders.clone().unwrap_or_default();

    if verbosity == Verbosity::Verbose && !request.json {
        eprintln!("[VERBOSE] futurify v{}", env!("CARGO_PKG_VERSION"));
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Config: {}", path.display());
        }
        eprintln!("[VERBOSE] Adding imports: {}", joined(&request.add));
        eprintln!("[VERBOSE] Removing imports: {}", joined(&request.remove));
        eprintln!();
    }

    // Validate every root before touching anything, so a typo in the last
    // path does not leave the first trees half-processed.
    for path in &request.paths {
        if !path.exists() {
            eprintln!(
                "futurify: {}",
                FuturifyError::PathNotFound { path: path.clone() }
            );
            return Ok(1);
        }
    }

    let options = RewriteOptions {
        add: request.add.clone(),
        remove: request.remove.clone(),
        dry_run: request.dry_run,
        leader,
        line_length,
    };

    let spinner = if verbosity == Verbosity::Normal && !request.json {
        Some(output::create_spinner())
    } else {
        None
    };

    let mut reports: Vec<FileReport> = Vec::new();
    let mut failures: Vec<FuturifyError> = Vec::new();
    for path in &request.paths {
        match process_tree(path, &options, &exclude_folders) {
            Ok(outcomes) => {
                for outcome in outcomes {
                    match outcome {
                        Ok(report) => reports.push(report),
                        Err(e) => failures.push(e),
                    }
                }
            }
            // Roots were validated above; a tree can still vanish mid-run.
            Err(e) => failures.push(e),
        }
    }

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    render(writer, &request, verbosity, &reports, &failures)?;

    Ok(i32::from(!failures.is_empty()))
}

/// Renders the collected run outcome according to mode and verbosity.
fn render<W: std::io::Write>(
    writer: &mut W,
    request: &Request,
    verbosity: Verbosity,
    reports: &[FileReport],
    failures: &[FuturifyError],
) -> Result<()> {
    let failure_refs: Vec<&FuturifyError> = failures.iter().collect();

    if request.json {
        output::print_json(writer, reports, &failure_refs)?;
        return Ok(());
    }

    if verbosity != Verbosity::Silent {
        for report in reports {
            if request.dry_run {
                output::print_preview(writer, report)?;
            } else if verbosity == Verbosity::Verbose {
                output::print_rewrite(writer, report)?;
            }
        }
        let updated = reports.iter().filter(|r| !r.is_noop()).count();
        output::print_summary(
            writer,
            request.dry_run,
            updated,
            reports.len() - updated,
            failures.len(),
        )?;
    }

    let mut stderr = std::io::stderr();
    output::print_failures(&mut stderr, &failure_refs)?;
    Ok(())
}

/// Builds the usage error message; invocations that named paths also get the
/// block of recommended keywords.
fn usage_message(request: &Request) -> String {
    let mut message =
        "usage: futurify [--dry-run] [--verbose | --silent] <+keywords> <-keywords> <paths>"
            .to_owned();
    if !request.paths.is_empty() {
        message.push('\n');
        message.push_str(RECOMMENDATIONS);
    }
    message
}

/// Sorted, comma-joined rendering of a flag set for verbose output.
fn joined(flags: &rustc_hash::FxHashSet<String>) -> String {
    let mut sorted: Vec<&str> = flags.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}
