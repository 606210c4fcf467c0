//! Syntax-tree helpers shared by the Python locators.

use ast_grep_core::Node;

/// A decorator attached to a definition, reduced to what the locators need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decorator {
    /// Dotted target without call arguments: `dataclasses.dataclass`.
    pub path: String,
    /// Keyword arguments when the decorator is a call, as written.
    pub keywords: Vec<(String, String)>,
}

impl Decorator {
    /// A decorator-like reference without arguments, e.g. the callee of
    /// `staticmethod(fn)` in a class-body assignment.
    pub fn bare(path: &str) -> Self {
        Self {
            path: compact(path),
            keywords: Vec::new(),
        }
    }

    /// Whether the dotted path is `name` or ends in `.name`.
    pub fn is(&self, name: &str) -> bool {
        path_matches(&self.path, name)
    }

    pub fn keyword(&self, name: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn path_matches(path: &str, name: &str) -> bool {
    path == name
        || path
            .strip_suffix(name)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Check if any decorator matches one of the given names (handles dotted paths).
pub(crate) fn decorator_matches_any(decorators: &[Decorator], names: &[&str]) -> bool {
    decorators
        .iter()
        .any(|d| names.iter().any(|name| d.is(name)))
}

/// Decorators attached to `node`.
///
/// `node` may be the `decorated_definition` itself or the class/function
/// definition wrapped by one.
pub(crate) fn extract_decorators<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Decorator> {
    let holder = if node.kind().as_ref() == "decorated_definition" {
        Some(node.clone())
    } else {
        node.parent()
            .filter(|p| p.kind().as_ref() == "decorated_definition")
    };
    let Some(holder) = holder else {
        return Vec::new();
    };
    holder
        .children()
        .filter(|c| c.kind().as_ref() == "decorator")
        .map(|c| parse_decorator(&c))
        .collect()
}

fn parse_decorator<D: ast_grep_core::Doc>(decorator: &Node<D>) -> Decorator {
    let expr = decorator.children().find(Node::is_named);
    match expr {
        Some(call) if call.kind().as_ref() == "call" => Decorator {
            path: call
                .field("function")
                .map(|f| compact(&f.text()))
                .unwrap_or_default(),
            keywords: keyword_arguments(&call),
        },
        Some(expr) => Decorator {
            path: compact(&expr.text()),
            keywords: Vec::new(),
        },
        None => Decorator {
            path: compact(decorator.text().trim_start_matches('@')),
            keywords: Vec::new(),
        },
    }
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `name=value` pairs of a call's argument list, values as written.
pub(crate) fn keyword_arguments<D: ast_grep_core::Doc>(call: &Node<D>) -> Vec<(String, String)> {
    let Some(args) = call.field("arguments") else {
        return Vec::new();
    };
    args.children()
        .filter(|c| c.kind().as_ref() == "keyword_argument")
        .filter_map(|kw| {
            let name = kw.field("name")?.text().to_string();
            let value = kw.field("value")?.text().to_string();
            Some((name, value))
        })
        .collect()
}

/// Python boolean literal, if `text` is one.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "True" => Some(true),
        "False" => Some(false),
        _ => None,
    }
}

/// The identifier bound by a class or function definition.
pub(crate) fn definition_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    node.field("name").map(|n| n.text().to_string())
}

/// `async def` parses as a `function_definition` with an `async` token.
pub(crate) fn is_async<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.children().any(|c| c.kind().as_ref() == "async")
}

/// 0-based inclusive line span covered by `node`.
///
/// The end is derived from the node's own text so a node whose end
/// position sits at column 0 of the following line is not over-counted.
pub(crate) fn line_span<D: ast_grep_core::Doc>(node: &Node<D>) -> (usize, usize) {
    let start = node.start_pos().line();
    let rows = node.text().lines().count().max(1);
    (start, start + rows - 1)
}

/// 0-based line of the last token of `node` that is not a comment.
///
/// tree-sitter attaches comments trailing a block to the block itself;
/// they are not part of the definition's code.
pub(crate) fn last_code_line<D: ast_grep_core::Doc>(node: &Node<D>) -> usize {
    node.dfs()
        .filter(|n| n.children().next().is_none())
        .filter(|n| n.kind().as_ref() != "comment" && !n.text().is_empty())
        .map(|n| line_span(&n).1)
        .max()
        .unwrap_or_else(|| line_span(node).1)
}

/// A module-level class named `name`: `(outer, class)` where `outer` is
/// the `decorated_definition` when decorators are attached.
pub(crate) fn find_top_level_class<'r, D: ast_grep_core::Doc>(
    module: &Node<'r, D>,
    name: &str,
) -> Option<(Node<'r, D>, Node<'r, D>)> {
    module.children().find_map(|child| match child.kind().as_ref() {
        "class_definition" if definition_name(&child).as_deref() == Some(name) => {
            Some((child.clone(), child.clone()))
        }
        "decorated_definition" => {
            let inner = child.field("definition")?;
            (inner.kind().as_ref() == "class_definition"
                && definition_name(&inner).as_deref() == Some(name))
            .then(|| (child.clone(), inner))
        }
        _ => None,
    })
}
