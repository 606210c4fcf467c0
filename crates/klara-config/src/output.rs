//! Generated test output settings.

use serde::{Deserialize, Serialize};

fn default_tests_dir() -> String {
    "tests".to_string()
}

fn default_test_runner() -> String {
    "pytest".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory, beside the package directory, that receives test files.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: String,

    /// Program run on the written test file.
    #[serde(default = "default_test_runner")]
    pub test_runner: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tests_dir: default_tests_dir(),
            test_runner: default_test_runner(),
        }
    }
}
