//! Generation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while prompting the model and writing its output.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model server returned a non-success status or an error line.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A line of the response stream was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// A source path lacks the parent directory or stem an import needs.
    #[error("cannot derive a module path from {}", .0.display())]
    InvalidSourcePath(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
