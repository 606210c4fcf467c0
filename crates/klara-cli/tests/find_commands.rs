//! Runs the `klara` binary against the parser's Python fixture tree.

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../klara-parser/tests/fixtures/test-package")
}

fn klara(args: &[&str]) -> Output {
    let home = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_klara"))
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("KLARA_LOG")
        .output()
        .expect("spawn klara")
}

#[test]
fn find_function_prints_match() {
    let root = fixture_root();
    let out = klara(&["--root", root.to_str().unwrap(), "find-function", "another_function"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(
        json["source_code"]
            .as_str()
            .unwrap()
            .starts_with("def another_function(")
    );
    assert!(json["file_path"].as_str().unwrap().ends_with("lorem_ipsum.py"));
}

#[test]
fn find_class_prints_descriptor() {
    let root = fixture_root();
    let out = klara(&["-r", root.to_str().unwrap(), "-f", "raw", "find-class", "CoolNewList"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["is_aggregate_type"], true);
    assert!(
        json["source_code"]
            .as_str()
            .unwrap()
            .contains("class CoolNewList")
    );
}

#[test]
fn missing_symbol_prints_null() {
    let root = fixture_root();
    let out = klara(&["--root", root.to_str().unwrap(), "find-function", "no_such_function"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "null");
}

#[test]
fn missing_root_aborts() {
    let out = klara(&["--root", "/definitely/not/here", "find-class", "A"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
}

#[test]
fn test_command_for_unknown_symbol_is_an_error() {
    let root = fixture_root();
    let out = klara(&["--root", root.to_str().unwrap(), "test-class", "Nope", "--no-run"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("class 'Nope' not found"));
}

#[test]
fn quiet_and_verbose_together_abort() {
    let out = klara(&["-q", "-v", "find-class", "A"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
}
