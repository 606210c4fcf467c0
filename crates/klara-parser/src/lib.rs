//! # klara-parser
//!
//! ast-grep-based location of Python functions and classes in a source tree.
//!
//! - **Function Locator** ([`find_function`]): first plain `def` with a given
//!   name, depth-first, across every `.py` file under a root.
//! - **Class Locator** ([`find_class`]): first module-level class with a
//!   given name, with its members classified from decorators, dataclass
//!   metadata, and decorator-inclusive source recovered through
//!   [`recovery`]'s strategy chain.
//!
//! Nothing is executed: classes are inspected through the syntax tree only.
//! Files that fail to read or parse are skipped; only a missing root aborts
//! a search.

use std::path::Path;

pub mod class;
pub mod dataclass;
pub mod error;
pub mod function;
mod lines;
pub mod parser;
mod pyhelpers;
pub mod recovery;
pub mod walk;

pub use class::{describe_class, find_class, find_class_with};
pub use error::ParserError;
pub use function::{find_function, find_function_in_tree, find_function_with};
pub use lines::{has_dataclass_marker, slice_definition};
pub use parser::{LoadedTree, is_python_file, load_tree, parse_python};
pub use walk::{WalkOptions, python_files};

/// Fail with [`ParserError::DirectoryNotFound`] unless `root` is a directory.
///
/// # Errors
/// Returns [`ParserError::DirectoryNotFound`] when `root` is missing or is
/// not a directory.
pub fn ensure_directory(root: &Path) -> Result<(), ParserError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(ParserError::DirectoryNotFound(root.to_path_buf()))
    }
}
