use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A function definition located in a source tree.
///
/// `source_code` is an exact run of lines of the file at `file_path`,
/// from the `def` line through the last body line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMatch {
    pub source_code: String,
    pub file_path: PathBuf,
}

impl FunctionMatch {
    #[must_use]
    pub fn new(source_code: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            source_code: source_code.into(),
            file_path: file_path.into(),
        }
    }
}
