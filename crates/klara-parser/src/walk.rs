//! Source file enumeration for the locators.
//!
//! Uses the `ignore` crate's walker, sorted by file name so that every run
//! over an unchanged tree visits files in the same order.
//!
//! ## Walking modes
//!
//! - default: no filters, every `.py` file under the root including hidden
//!   and git-ignored ones (a plain recursive walk).
//! - `respect_gitignore`: honors `.gitignore` (with or without a git repo)
//!   and a custom `.klaraignore` file.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use crate::parser::is_python_file;

/// Custom ignore file honored when `respect_gitignore` is set.
pub const IGNORE_FILE_NAME: &str = ".klaraignore";

/// Filters applied while enumerating source files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Apply `.gitignore` and `.klaraignore` rules.
    pub respect_gitignore: bool,
    /// Drop files whose name starts with `__` (`__init__.py`, `__main__.py`).
    pub skip_dunder_files: bool,
}

impl WalkOptions {
    /// Options used by the Function Locator: every Python file.
    #[must_use]
    pub const fn functions() -> Self {
        Self {
            respect_gitignore: false,
            skip_dunder_files: false,
        }
    }

    /// Options used by the Class Locator: dunder files are skipped.
    #[must_use]
    pub const fn classes() -> Self {
        Self {
            respect_gitignore: false,
            skip_dunder_files: true,
        }
    }

    #[must_use]
    pub const fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }
}

/// Build a name-sorted walker over `root`.
pub fn build_walker(root: &Path, respect_gitignore: bool) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder.hidden(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    if respect_gitignore {
        builder.require_git(false);
        builder.add_custom_ignore_filename(IGNORE_FILE_NAME);
    } else {
        builder.standard_filters(false);
    }

    builder.build()
}

/// Every Python file under `root`, in deterministic walk order.
///
/// Entries the walker cannot read are logged and skipped.
#[must_use]
pub fn python_files(root: &Path, options: &WalkOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in build_walker(root, options.respect_gitignore) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, root = %root.display(), "skipping unreadable walk entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !is_python_file(path) {
            continue;
        }
        if options.skip_dunder_files
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("__"))
        {
            continue;
        }
        files.push(entry.into_path());
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn create_fixture(dir: &Path) {
        for d in ["pkg", "pkg/sub", ".hidden", "build"] {
            fs::create_dir_all(dir.join(d)).expect("mkdir should succeed");
        }
        let files = [
            ("pkg/__init__.py", ""),
            ("pkg/b.py", "def b():\n    pass\n"),
            ("pkg/a.py", "def a():\n    pass\n"),
            ("pkg/sub/c.py", "class C:\n    pass\n"),
            ("pkg/notes.txt", "not python"),
            (".hidden/h.py", "x = 1\n"),
            ("build/gen.py", "y = 2\n"),
            (".gitignore", "build/\n"),
        ];
        for (path, content) in files {
            fs::write(dir.join(path), content).expect("write should succeed");
        }
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn default_walk_lists_every_python_file_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let files = python_files(tmp.path(), &WalkOptions::functions());
        assert_eq!(
            relative(tmp.path(), &files),
            vec![
                ".hidden/h.py",
                "build/gen.py",
                "pkg/__init__.py",
                "pkg/a.py",
                "pkg/b.py",
                "pkg/sub/c.py",
            ]
        );
    }

    #[test]
    fn class_walk_skips_dunder_files() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());

        let files = relative(tmp.path(), &python_files(tmp.path(), &WalkOptions::classes()));
        assert!(!files.iter().any(|f| f.ends_with("__init__.py")), "{files:?}");
        assert!(files.contains(&"pkg/sub/c.py".to_string()));
    }

    #[test]
    fn gitignore_mode_applies_ignore_files() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());
        fs::write(tmp.path().join(IGNORE_FILE_NAME), "pkg/b.py\n").unwrap();

        let options = WalkOptions::functions().with_gitignore(true);
        let files = relative(tmp.path(), &python_files(tmp.path(), &options));
        assert!(!files.iter().any(|f| f.starts_with("build/")), "{files:?}");
        assert!(!files.contains(&"pkg/b.py".to_string()), "{files:?}");
        assert!(files.contains(&"pkg/a.py".to_string()));
    }

    #[test]
    fn walk_is_repeatable() {
        let tmp = tempfile::tempdir().unwrap();
        create_fixture(tmp.path());
        let first = python_files(tmp.path(), &WalkOptions::functions());
        let second = python_files(tmp.path(), &WalkOptions::functions());
        assert_eq!(first, second);
    }
}
