//! Test file placement and writing.
//!
//! Assumes a two-level layout: `<project>/<package>/<module>.py` with tests
//! in `<project>/<tests_dir>/test_<module>.py`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::GenerateError;

fn package_and_stem(source_file: &Path) -> Result<(&str, &str), GenerateError> {
    let invalid = || GenerateError::InvalidSourcePath(source_file.to_path_buf());
    let stem = source_file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;
    let package = source_file
        .parent()
        .and_then(Path::file_name)
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;
    Ok((package, stem))
}

/// `from <package>.<module> import <symbol>` plus a blank line.
///
/// # Errors
/// Returns [`GenerateError::InvalidSourcePath`] when the file has no
/// parent directory name or no stem.
pub fn import_statement(source_file: &Path, symbol: &str) -> Result<String, GenerateError> {
    let (package, stem) = package_and_stem(source_file)?;
    Ok(format!("from {package}.{stem} import {symbol}\n\n"))
}

/// `<source_file>/../../<tests_dir>/test_<stem>.py`.
///
/// # Errors
/// Returns [`GenerateError::InvalidSourcePath`] when the file is not at
/// least two levels deep.
pub fn test_file_path(source_file: &Path, tests_dir: &str) -> Result<PathBuf, GenerateError> {
    let (_, stem) = package_and_stem(source_file)?;
    let project = source_file
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| GenerateError::InvalidSourcePath(source_file.to_path_buf()))?;
    Ok(project.join(tests_dir).join(format!("test_{stem}.py")))
}

/// Append `test_code`, prefixed by the import of `symbol`, to the test file
/// for `source_file`. Creates the tests directory when missing.
///
/// # Errors
/// Returns [`GenerateError::InvalidSourcePath`] for an unusable source path
/// and [`GenerateError::Io`] if the test file cannot be written.
pub fn write_tests(
    source_file: &Path,
    symbol: &str,
    test_code: &str,
    tests_dir: &str,
) -> Result<PathBuf, GenerateError> {
    let import = import_statement(source_file, symbol)?;
    let output = test_file_path(source_file, tests_dir)?;
    let io_err = |source| GenerateError::Io {
        path: output.clone(),
        source,
    };

    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&output)
        .map_err(io_err)?;
    file.write_all(import.as_bytes()).map_err(io_err)?;
    file.write_all(test_code.as_bytes()).map_err(io_err)?;

    info!(path = %output.display(), "tests written");
    Ok(output)
}
