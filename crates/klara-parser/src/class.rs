//! Class Locator.
//!
//! Files are loaded structurally (parsed, never executed). The first file
//! with a module-level class of the requested name wins.

use std::path::Path;

use ast_grep_core::Node;
use klara_core::{ClassDescriptor, MemberKind};
use tracing::{debug, warn};

use crate::dataclass::{auto_derived_methods, dataclass_options, defined_methods, extract_fields};
use crate::error::ParserError;
use crate::parser::{LoadedTree, load_tree};
use crate::pyhelpers::{
    Decorator, decorator_matches_any, definition_name, extract_decorators, find_top_level_class,
    line_span,
};
use crate::recovery::{RecoveryContext, recover_class_source};
use crate::walk::{WalkOptions, python_files};

const PROPERTY_DECORATORS: &[&str] = &[
    "property",
    "cached_property",
    "setter",
    "getter",
    "deleter",
    "abstractproperty",
];

/// Locate `class_name` under `root` and describe it.
///
/// # Errors
/// Returns [`ParserError::DirectoryNotFound`] if `root` is not a directory.
/// Per-file failures are logged and skipped.
pub fn find_class(root: &Path, class_name: &str) -> Result<Option<ClassDescriptor>, ParserError> {
    find_class_with(root, class_name, &WalkOptions::classes())
}

/// [`find_class`] with explicit walk options.
///
/// # Errors
/// Returns [`ParserError::DirectoryNotFound`] if `root` is not a directory.
pub fn find_class_with(
    root: &Path,
    class_name: &str,
    options: &WalkOptions,
) -> Result<Option<ClassDescriptor>, ParserError> {
    crate::ensure_directory(root)?;

    for path in python_files(root, options) {
        let tree = match load_tree(&path) {
            Ok(tree) => tree,
            Err(error) => {
                warn!(%error, "skipping file that could not be loaded");
                continue;
            }
        };
        if let Some(descriptor) = describe_class(&tree, class_name) {
            debug!(class = class_name, path = %path.display(), "class found");
            return Ok(Some(descriptor));
        }
    }
    Ok(None)
}

/// Describe a module-level class of `tree`, if it defines one named `class_name`.
#[must_use]
pub fn describe_class(tree: &LoadedTree, class_name: &str) -> Option<ClassDescriptor> {
    let root = tree.tree.root();
    let (outer, class) = find_top_level_class(&root, class_name)?;

    let decorators = extract_decorators(&outer);
    let dataclass = decorators.iter().find(|d| d.is("dataclass"));

    let mut descriptor = ClassDescriptor {
        is_aggregate_type: dataclass.is_some(),
        file_path: tree.path.clone(),
        ..ClassDescriptor::default()
    };
    classify_members(&class, &mut descriptor);

    if let Some(decorator) = dataclass {
        let options = dataclass_options(decorator);
        descriptor.fields = extract_fields(&class);
        descriptor.auto_derived_methods = auto_derived_methods(&options, &defined_methods(&class));
    }

    descriptor.source_code = recover_class_source(&RecoveryContext {
        class_name,
        file_path: &tree.path,
        content: &tree.source,
        node_span: Some(line_span(&outer)),
        is_aggregate: descriptor.is_aggregate_type,
    });
    Some(descriptor)
}

fn classify_members<D: ast_grep_core::Doc>(class: &Node<D>, descriptor: &mut ClassDescriptor) {
    let Some(body) = class.field("body") else {
        return;
    };
    for child in body.children() {
        let Some((name, kind)) = body_member(&child) else {
            continue;
        };
        if name.starts_with('_') {
            continue;
        }
        descriptor.push_member(kind, name);
    }
    descriptor.normalize_members();
}

/// Name and kind of a class-body statement that binds a callable or property.
///
/// Nested classes are callable, so they count as instance methods.
fn body_member<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<(String, MemberKind)> {
    match node.kind().as_ref() {
        "function_definition" | "class_definition" => {
            Some((definition_name(node)?, MemberKind::Instance))
        }
        "decorated_definition" => {
            let inner = node.field("definition")?;
            let kind = match inner.kind().as_ref() {
                "function_definition" => member_kind(&extract_decorators(node)),
                "class_definition" => MemberKind::Instance,
                _ => return None,
            };
            Some((definition_name(&inner)?, kind))
        }
        "expression_statement" => assigned_member(node),
        _ => None,
    }
}

/// `name = staticmethod(fn)`, `name = property(getter)`, `name = lambda ...`.
fn assigned_member<D: ast_grep_core::Doc>(statement: &Node<D>) -> Option<(String, MemberKind)> {
    let assignment = statement
        .children()
        .find(|c| c.kind().as_ref() == "assignment")?;
    let target = assignment
        .field("left")
        .filter(|l| l.kind().as_ref() == "identifier")?;
    let value = assignment.field("right")?;
    let kind = match value.kind().as_ref() {
        "lambda" => MemberKind::Instance,
        "call" => wrapper_kind(&[Decorator::bare(&value.field("function")?.text())])?,
        _ => return None,
    };
    Some((target.text().to_string(), kind))
}

fn wrapper_kind(wrappers: &[Decorator]) -> Option<MemberKind> {
    if decorator_matches_any(wrappers, &["classmethod"]) {
        Some(MemberKind::Class)
    } else if decorator_matches_any(wrappers, &["staticmethod"]) {
        Some(MemberKind::Static)
    } else if decorator_matches_any(wrappers, PROPERTY_DECORATORS) {
        Some(MemberKind::Property)
    } else {
        None
    }
}

fn member_kind(decorators: &[Decorator]) -> MemberKind {
    wrapper_kind(decorators).unwrap_or(MemberKind::Instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn describe(source: &str, name: &str) -> Option<ClassDescriptor> {
        let tree = parse_source(Path::new("pkg/shapes.py"), source.to_string()).unwrap();
        describe_class(&tree, name)
    }

    const SHAPES: &str = "\
import functools


class Shape:
    sides = 0

    def __init__(self, name):
        self._name = name

    def area(self):
        raise NotImplementedError

    async def render(self):
        pass

    @classmethod
    def from_dict(cls, data):
        return cls(data[\"name\"])

    @staticmethod
    def unit():
        return 1

    @property
    def name(self):
        return self._name

    @name.setter
    def name(self, value):
        self._name = value

    @functools.cached_property
    def label(self):
        return self._name.upper()

    def _private(self):
        pass
";

    #[test]
    fn members_are_classified_by_decorator() {
        let desc = describe(SHAPES, "Shape").unwrap();
        assert_eq!(desc.instance_methods, vec!["area", "render"]);
        assert_eq!(desc.class_methods, vec!["from_dict"]);
        assert_eq!(desc.static_methods, vec!["unit"]);
        assert_eq!(desc.properties, vec!["label", "name"]);
        assert!(!desc.is_aggregate_type);
        assert!(desc.fields.is_empty());
        assert!(desc.auto_derived_methods.is_empty());
        assert_eq!(desc.file_path, PathBuf::from("pkg/shapes.py"));
    }

    #[test]
    fn plain_class_source_starts_at_class_line() {
        let desc = describe(SHAPES, "Shape").unwrap();
        assert!(desc.source_code.starts_with("class Shape:\n    sides = 0"));
        assert!(desc.source_code.ends_with("    def _private(self):\n        pass"));
    }

    #[test]
    fn dataclass_reports_fields_and_derived_methods() {
        let source = "\
from dataclasses import dataclass, field


@dataclass(order=True)
class Version:
    major: int
    minor: int = 0
    tags: list[str] = field(default_factory=list)

    def __repr__(self):
        return f\"{self.major}.{self.minor}\"

    def bump(self):
        self.minor += 1
";
        let desc = describe(source, "Version").unwrap();
        assert!(desc.is_aggregate_type);
        let names: Vec<&str> = desc.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["major", "minor", "tags"]);
        assert_eq!(
            desc.auto_derived_methods,
            vec!["__init__", "__eq__", "__lt__", "__le__", "__gt__", "__ge__"]
        );
        assert_eq!(desc.instance_methods, vec!["bump"]);
        assert!(desc.source_code.starts_with("@dataclass(order=True)\nclass Version:"));
        assert!(desc.source_code.ends_with("        self.minor += 1"));
    }

    #[test]
    fn assigned_wrappers_and_nested_classes_are_members() {
        let source = "\
class K:
    helper = staticmethod(len)
    build = classmethod(lambda cls: cls())
    size = property(lambda self: 1)
    double = lambda self, x: x * 2
    limit = 10
    _hidden = staticmethod(len)

    class Meta:
        ordering = [\"id\"]

    def run(self):
        pass
";
        let desc = describe(source, "K").unwrap();
        assert_eq!(desc.instance_methods, vec!["Meta", "double", "run"]);
        assert_eq!(desc.class_methods, vec!["build"]);
        assert_eq!(desc.static_methods, vec!["helper"]);
        assert_eq!(desc.properties, vec!["size"]);
    }

    #[test]
    fn dataclass_field_calls_are_not_members() {
        let source = "\
@dataclass
class D:
    items: list = field(default_factory=list)
    total: int = 0
";
        let desc = describe(source, "D").unwrap();
        assert!(desc.instance_methods.is_empty());
        assert!(desc.properties.is_empty());
    }

    #[test]
    fn undecorated_subclass_of_dataclass_is_not_aggregate() {
        let source = "\
@dataclass
class Base:
    x: int


class Child(Base):
    def total(self):
        return self.x
";
        let desc = describe(source, "Child").unwrap();
        assert!(!desc.is_aggregate_type);
        assert!(desc.fields.is_empty());
        assert_eq!(desc.instance_methods, vec!["total"]);
    }

    #[test]
    fn unknown_class_is_none() {
        assert_eq!(describe(SHAPES, "Circle"), None);
    }

    #[test]
    fn class_nested_in_function_is_not_module_level() {
        let source = "def make():\n    class Local:\n        pass\n    return Local\n";
        assert_eq!(describe(source, "Local"), None);
    }
}
