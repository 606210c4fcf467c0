use std::path::{Path, PathBuf};

use anyhow::Context;
use klara_config::KlaraConfig;
use klara_parser::WalkOptions;

/// Shared state resolved once at startup.
pub struct AppContext {
    pub root: PathBuf,
    pub config: KlaraConfig,
}

impl AppContext {
    #[must_use]
    pub const fn new(root: PathBuf, config: KlaraConfig) -> Self {
        Self { root, config }
    }

    /// Walk options for the Function Locator.
    #[must_use]
    pub const fn function_walk(&self) -> WalkOptions {
        WalkOptions::functions().with_gitignore(self.config.search.respect_gitignore)
    }

    /// Walk options for the Class Locator.
    #[must_use]
    pub const fn class_walk(&self) -> WalkOptions {
        WalkOptions::classes().with_gitignore(self.config.search.respect_gitignore)
    }
}

/// The search root: `--root` when given, otherwise the current directory.
///
/// Fails before any extraction when the directory does not exist.
pub fn resolve_root(root_override: Option<&Path>) -> anyhow::Result<PathBuf> {
    let root = match root_override {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    if !root.is_dir() {
        anyhow::bail!("invalid --root '{}': directory does not exist", root.display());
    }
    Ok(root)
}
