//! Error types for file level operations.

use std::path::PathBuf;
use thiserror::Error;

/// Error is returned by operations that touch the filesystem.
///
/// Malformed markup is never an error: it degrades to appending.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to {action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Creates an I/O error for `action` on `path`.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Creates a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
