use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while scanning or rewriting `__future__` imports.
#[derive(Debug, Error)]
pub enum FuturifyError {
    /// The supplied root path does not exist on the filesystem.
    ///
    /// Distinct from "exists but is not a Python file": existing non-target
    /// files are silently skipped during a tree walk, a missing root is fatal
    /// for the whole invocation.
    #[error("path not found: {}", .path.display())]
    PathNotFound {
        /// The missing path as supplied by the caller.
        path: PathBuf,
    },

    /// Read, write, or rename failure on an individual file.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File the operation failed on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid or insufficient command-line arguments.
    #[error("{message}")]
    Usage {
        /// Full usage message, including recommendations when applicable.
        message: String,
    },
}

impl FuturifyError {
    /// Wraps an `io::Error` with the path it occurred on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
