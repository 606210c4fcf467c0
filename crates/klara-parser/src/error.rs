//! Parser error types for klara-parser.

use std::path::PathBuf;

/// Errors raised while loading files and searching a source tree.
///
/// Only [`ParserError::DirectoryNotFound`] aborts a search. The other
/// variants are per-file and make the locators skip that file.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Syntax error in {} at line {line}", .path.display())]
    Syntax { path: PathBuf, line: usize },

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParserError {
    /// Whether this error only concerns one file of the tree.
    #[must_use]
    pub const fn is_per_file(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::Io { .. })
    }
}
