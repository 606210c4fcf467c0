//! Subprocesses: the test runner and `ollama create`.

use std::path::Path;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{info, warn};

use crate::error::GenerateError;

/// Extra runner flag used for class tests.
pub const NO_CONFTEST: &str = "--noconftest";

async fn run(mut command: Command, program: &str) -> Result<ExitStatus, GenerateError> {
    let status = command
        .status()
        .await
        .map_err(|source| GenerateError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if status.success() {
        info!(program, "subprocess finished");
    } else {
        warn!(program, code = ?status.code(), "subprocess exited with failure");
    }
    Ok(status)
}

/// Run `program <test_path> <extra_args...>` with inherited stdio.
///
/// # Errors
/// Returns [`GenerateError::Spawn`] if the program cannot be started. A
/// failing test run is reported through the returned status, not an error.
pub async fn run_test_runner(
    program: &str,
    test_path: &Path,
    extra_args: &[&str],
) -> Result<ExitStatus, GenerateError> {
    let mut command = Command::new(program);
    command.arg(test_path).args(extra_args);
    run(command, program).await
}

/// Register `name` with the local Ollama server from `modelfile`.
///
/// # Errors
/// Returns [`GenerateError::Spawn`] if `ollama` cannot be started.
pub async fn create_model(name: &str, modelfile: &Path) -> Result<ExitStatus, GenerateError> {
    info!(model = name, modelfile = %modelfile.display(), "creating model");
    let mut command = Command::new("ollama");
    command.arg("create").arg(name).arg("-f").arg(modelfile);
    run(command, "ollama").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_exit_status() {
        let ok = run_test_runner("true", Path::new("tests/test_x.py"), &[])
            .await
            .unwrap();
        assert!(ok.success());

        let failed = run_test_runner("false", Path::new("tests/test_x.py"), &[NO_CONFTEST])
            .await
            .unwrap();
        assert!(!failed.success());
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let err = run_test_runner("klara-no-such-runner", Path::new("t.py"), &[])
            .await
            .unwrap_err();
        assert!(
            matches!(&err, GenerateError::Spawn { program, .. } if program == "klara-no-such-runner")
        );
    }
}
