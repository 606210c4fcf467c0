use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the source of the first function with this name.
    FindFunction(SymbolArgs),
    /// Print the descriptor of the first class with this name.
    FindClass(SymbolArgs),
    /// Generate pytest tests for a function and run them.
    TestFunction(TestArgs),
    /// Generate pytest tests for a class and run them.
    TestClass(TestArgs),
    /// Register the test-generation model with the local Ollama server.
    CreateModel(CreateModelArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SymbolArgs {
    /// Name as written in the source.
    pub name: String,
}

#[derive(Clone, Debug, Args)]
pub struct TestArgs {
    /// Name as written in the source.
    pub name: String,

    /// Write the tests without running the test runner.
    #[arg(long)]
    pub no_run: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CreateModelArgs {
    /// Modelfile to build from (defaults to `model.modelfile`).
    #[arg(long)]
    pub modelfile: Option<PathBuf>,

    /// Model name (defaults to `model.name`).
    #[arg(long)]
    pub name: Option<String>,
}
