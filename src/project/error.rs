//! Error types for redirection file handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading redirection files.
///
/// These never escape the resolver: they are logged and the affected file
/// contributes no search paths.
#[derive(Debug, Error)]
pub enum RedirectionError {
    /// No redirection file in the project or binary directory.
    #[error("redirection file '{name}' not found (searched {searched:?})")]
    NotFound { name: String, searched: Vec<PathBuf> },

    /// The file exists but could not be read.
    #[error("failed to read redirection file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An `{include}` chain leads back to a file already being read.
    #[error("include cycle at {}", .0.display())]
    IncludeCycle(PathBuf),
}

impl RedirectionError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
