//! Tree Loader: ast-grep wrapper that turns one Python file into a syntax tree.

use std::path::{Path, PathBuf};

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};

use crate::error::ParserError;

/// The concrete AST tree type returned by [`parse_python`].
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// A parsed source file. Owned by the search step that loaded it.
pub struct LoadedTree {
    pub path: PathBuf,
    pub source: String,
    pub tree: AstTree,
}

impl LoadedTree {
    /// The file content split into lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.source.lines().collect()
    }
}

impl std::fmt::Debug for LoadedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedTree")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish_non_exhaustive()
    }
}

/// Returns `true` for files with the `.py` extension.
#[must_use]
pub fn is_python_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}

/// Parse Python source into an ast-grep tree.
///
/// tree-sitter always produces a tree; use [`first_syntax_error`] to find
/// out whether the source was valid.
#[must_use]
pub fn parse_python(source: &str) -> AstTree {
    SupportLang::Python.ast_grep(source)
}

/// 1-indexed line of the first `ERROR` or missing node, if any.
#[must_use]
pub fn first_syntax_error(tree: &AstTree) -> Option<usize> {
    tree.root()
        .dfs()
        .find(|node| node.kind().as_ref() == "ERROR" || node.is_missing())
        .map(|node| node.start_pos().line() + 1)
}

/// Parse already-read source, rejecting it if it contains syntax errors.
///
/// # Errors
/// Returns [`ParserError::Syntax`] when the tree has error nodes.
pub fn parse_source(path: &Path, source: String) -> Result<LoadedTree, ParserError> {
    let tree = parse_python(&source);
    if let Some(line) = first_syntax_error(&tree) {
        return Err(ParserError::Syntax {
            path: path.to_path_buf(),
            line,
        });
    }
    Ok(LoadedTree {
        path: path.to_path_buf(),
        source,
        tree,
    })
}

/// Read and parse one file.
///
/// # Errors
/// Returns [`ParserError::Io`] if the file cannot be read as UTF-8 and
/// [`ParserError::Syntax`] if it does not parse cleanly.
pub fn load_tree(path: &Path) -> Result<LoadedTree, ParserError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(path, source)
}
