//! # klara-generate
//!
//! Turns located source into a pytest module:
//!
//! 1. [`build_prompt`] wraps the code in the generation prompt.
//! 2. A [`ModelClient`] (normally [`OllamaClient`]) streams the completion.
//! 3. [`extract_test_code`] keeps the test code from the response.
//! 4. [`write_tests`] prepends the import and appends to the test file.
//!
//! [`run_test_runner`] and [`create_model`] wrap the `pytest` and
//! `ollama create` subprocesses.

mod error;
pub mod ollama;
pub mod output;
pub mod prompt;
pub mod response;
pub mod runner;

use std::path::{Path, PathBuf};

use tracing::info;

pub use error::GenerateError;
pub use ollama::{ModelClient, OllamaClient};
pub use output::{import_statement, test_file_path, write_tests};
pub use prompt::build_prompt;
pub use response::extract_test_code;
pub use runner::{NO_CONFTEST, create_model, run_test_runner};

/// What to generate tests for.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// File the symbol was found in.
    pub source_file: &'a Path,
    /// Function or class name, imported by the test module.
    pub symbol: &'a str,
    /// Verbatim source of the symbol.
    pub code: &'a str,
    /// Tests directory beside the package directory.
    pub tests_dir: &'a str,
}

/// Prompt `client` for tests of `request.code` and write them out.
///
/// Returns the path of the test file.
///
/// # Errors
/// Returns [`GenerateError`] if generation fails or the file cannot be written.
pub async fn generate_tests<C: ModelClient + Sync>(
    client: &C,
    request: GenerationRequest<'_>,
    on_chunk: &mut (dyn FnMut(&str) + Send),
) -> Result<PathBuf, GenerateError> {
    info!(
        symbol = request.symbol,
        file = %request.source_file.display(),
        "generating tests"
    );
    let prompt = build_prompt(request.code);
    let response = client.generate(&prompt, on_chunk).await?;
    let test_code = extract_test_code(&response);
    write_tests(request.source_file, request.symbol, &test_code, request.tests_dir)
}
