//! Function Locator.

use std::path::Path;

use klara_core::FunctionMatch;
use tracing::{debug, warn};

use crate::error::ParserError;
use crate::lines::slice_definition;
use crate::parser::{LoadedTree, load_tree};
use crate::pyhelpers::{definition_name, is_async, last_code_line, line_span};
use crate::walk::{WalkOptions, python_files};

/// Find the first plain `def function_name` under `root`.
///
/// Files are visited in walk order; within a file the tree is searched
/// depth-first, so a method with the same name counts as a match.
///
/// # Errors
/// Returns [`ParserError::DirectoryNotFound`] if `root` is not a directory.
/// Files that fail to read or parse are skipped.
pub fn find_function(root: &Path, function_name: &str) -> Result<Option<FunctionMatch>, ParserError> {
    find_function_with(root, function_name, &WalkOptions::functions())
}

/// [`find_function`] with explicit walk options.
///
/// # Errors
/// Returns [`ParserError::DirectoryNotFound`] if `root` is not a directory.
pub fn find_function_with(
    root: &Path,
    function_name: &str,
    options: &WalkOptions,
) -> Result<Option<FunctionMatch>, ParserError> {
    crate::ensure_directory(root)?;

    for path in python_files(root, options) {
        let tree = match load_tree(&path) {
            Ok(tree) => tree,
            Err(ParserError::Syntax { path, line }) => {
                debug!(path = %path.display(), line, "skipping file with syntax error");
                continue;
            }
            Err(error) => {
                warn!(%error, "skipping unreadable file");
                continue;
            }
        };
        if let Some(source_code) = find_function_in_tree(&tree, function_name) {
            return Ok(Some(FunctionMatch::new(source_code, path)));
        }
    }
    Ok(None)
}

/// Source text of the first matching `def` in one parsed file.
#[must_use]
pub fn find_function_in_tree(tree: &LoadedTree, function_name: &str) -> Option<String> {
    let root = tree.tree.root();
    let node = root.dfs().find(|node| {
        node.kind().as_ref() == "function_definition"
            && !is_async(node)
            && definition_name(node).as_deref() == Some(function_name)
    })?;
    let (start, end) = line_span(&node);
    slice_definition(&tree.lines(), start, Some(end.min(last_code_line(&node))))
}
