use crate::error::FuturifyError;
use clap::Parser;
use rustc_hash::FxHashSet;
use std::path::PathBuf;

/// Help text describing the token syntax, shown at the bottom of --help.
const TOKEN_HELP: &str = "\
TOKENS:
  +keyword    add `keyword` to every target file's __future__ imports
  -keyword    remove `keyword` from every target file's __future__ imports
  path        a file to rewrite, or a directory to walk for .py files

  At least one path and at least one +/- keyword are required.

CONFIGURATION FILE (.futurify.toml or [tool.futurify] in pyproject.toml):
  line_length = 80                  # canonical statement width
  leader = \"from __future__ import \"
  exclude_folders = [\"vendor\"]      # extends the built-in excludes
";

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
///
/// The positional list takes everything, hyphen-prefixed or not: `-keyword`
/// removal tokens require `allow_hyphen_values`, and with that set clap may
/// also hand us `--option` tokens appearing after the first positional.
/// [`Cli::classify_tokens`] therefore recognizes the same options again, so
/// placement does not change meaning.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "futurify - Add and remove __future__ imports across Python source trees",
    long_about = None,
    after_help = TOKEN_HELP
)]
pub struct Cli {
    /// `+keyword`, `-keyword`, and path tokens, in any order.
    #[arg(value_name = "TOKEN", allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Report would-be changes without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Show per-file processing detail.
    #[arg(long, conflicts_with = "silent")]
    pub verbose: bool,

    /// Suppress everything except failures.
    #[arg(long)]
    pub silent: bool,

    /// Output the run as a JSON document instead of styled text.
    #[arg(long)]
    pub json: bool,

    /// Maximum width of canonical import statement lines.
    #[arg(long, value_name = "N")]
    pub line_length: Option<usize>,
}

/// The fully classified invocation: flag changes, targets, and options.
#[derive(Debug, Default, Clone)]
pub struct Request {
    /// Flags named by `+keyword` tokens.
    pub add: FxHashSet<String>,
    /// Flags named by `-keyword` tokens.
    pub remove: FxHashSet<String>,
    /// Remaining tokens, treated as target paths.
    pub paths: Vec<PathBuf>,
    /// Preview mode requested.
    pub dry_run: bool,
    /// Verbose output requested.
    pub verbose: bool,
    /// Silent output requested.
    pub silent: bool,
    /// JSON output requested.
    pub json: bool,
    /// Canonical width override.
    pub line_length: Option<usize>,
}

impl Cli {
    /// Classifies the token list, folding in the options clap already parsed.
    ///
    /// Unknown `--option` tokens are a usage error rather than being treated
    /// as removals of an option-shaped keyword.
    pub fn classify_tokens(&self) -> Result<Request, FuturifyError> {
        let mut request = Request {
            dry_run: self.dry_run,
            verbose: self.verbose,
            silent: self.silent,
            json: self.json,
            line_length: self.line_length,
            ..Request::default()
        };

        for token in &self.tokens {
            if token.starts_with("--") {
                classify_option(token, &mut request)?;
            } else if let Some(flag) = token.strip_prefix('+') {
                if flag.is_empty() {
                    return Err(empty_keyword(token));
                }
                request.add.insert(flag.to_owned());
            } else if let Some(flag) = token.strip_prefix('-') {
                if flag.is_empty() {
                    return Err(empty_keyword(token));
                }
                request.remove.insert(flag.to_owned());
            } else {
                request.paths.push(PathBuf::from(token));
            }
        }
        Ok(request)
    }
}

/// Handles an `--option` token that clap passed through as a positional.
fn classify_option(token: &str, request: &mut Request) -> Result<(), FuturifyError> {
    match token {
        "--dry-run" => request.dry_run = true,
        "--verbose" => request.verbose = true,
        "--silent" => request.silent = true,
        "--json" => request.json = true,
        _ => {
            if let Some(value) = token.strip_prefix("--line-length=") {
                request.line_length =
                    Some(value.parse().map_err(|_| FuturifyError::Usage {
                        message: format!("invalid line length: {value}"),
                    })?);
            } else {
                return Err(FuturifyError::Usage {
                    message: format!("unrecognized option: {token}"),
                });
            }
        }
    }
    Ok(())
}

fn empty_keyword(token: &str) -> FuturifyError {
    FuturifyError::Usage {
        message: format!("`{token}` names no keyword"),
    }
}
