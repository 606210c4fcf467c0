//! Symbol Metadata Extractor: fields and generated methods of a dataclass.
//!
//! Works on the syntax tree only. Annotations and defaults are reported as
//! written; nothing is evaluated.

use ast_grep_core::Node;
use klara_core::{DataclassOptions, FieldDefault, FieldDescriptor};

use crate::pyhelpers::{Decorator, definition_name, keyword_arguments, parse_bool};

/// Special methods a dataclass may generate, in reporting order.
pub const CANONICAL_METHODS: [&str; 8] = [
    "__init__", "__repr__", "__eq__", "__hash__", "__lt__", "__le__", "__gt__", "__ge__",
];

const ORDERING_METHODS: [&str; 4] = ["__lt__", "__le__", "__gt__", "__ge__"];

/// Annotations that declare something other than an instance field.
const NON_FIELD_ANNOTATIONS: [&str; 3] = ["ClassVar", "InitVar", "KW_ONLY"];

/// Options from a `@dataclass(...)` decorator; bare decorators get defaults.
pub(crate) fn dataclass_options(decorator: &Decorator) -> DataclassOptions {
    let mut options = DataclassOptions::default();
    for (key, slot) in [
        ("init", &mut options.init),
        ("repr", &mut options.repr),
        ("eq", &mut options.eq),
        ("order", &mut options.order),
        ("unsafe_hash", &mut options.unsafe_hash),
        ("frozen", &mut options.frozen),
    ] {
        if let Some(flag) = decorator.keyword(key).and_then(parse_bool) {
            *slot = flag;
        }
    }
    options
}

/// Declared fields of a class body, in declaration order.
pub(crate) fn extract_fields<D: ast_grep_core::Doc>(class: &Node<D>) -> Vec<FieldDescriptor> {
    let Some(body) = class.field("body") else {
        return Vec::new();
    };
    body.children()
        .filter(|c| c.kind().as_ref() == "expression_statement")
        .filter_map(|stmt| {
            let assignment = stmt
                .children()
                .find(|c| c.kind().as_ref() == "assignment")?;
            field_from_assignment(&assignment)
        })
        .collect()
}

fn field_from_assignment<D: ast_grep_core::Doc>(assignment: &Node<D>) -> Option<FieldDescriptor> {
    let left = assignment.field("left")?;
    if left.kind().as_ref() != "identifier" {
        return None;
    }
    let annotation = assignment.field("type")?.text().to_string();
    if is_pseudo_field(&annotation) {
        return None;
    }

    let mut field = FieldDescriptor::new(left.text().to_string(), annotation, FieldDefault::None);
    let Some(right) = assignment.field("right") else {
        return Some(field);
    };

    if is_field_call(&right) {
        for (key, value) in keyword_arguments(&right) {
            match key.as_str() {
                "default" => field.default = FieldDefault::Value(value),
                "default_factory" => field.default = FieldDefault::Factory(value),
                "init" => field.init = parse_bool(&value).unwrap_or(field.init),
                "repr" => field.repr = parse_bool(&value).unwrap_or(field.repr),
                "compare" => field.compare = parse_bool(&value).unwrap_or(field.compare),
                "hash" => field.hash = parse_bool(&value),
                _ => {}
            }
        }
    } else {
        field.default = FieldDefault::Value(right.text().to_string());
    }
    Some(field)
}

fn is_pseudo_field(annotation: &str) -> bool {
    let base = annotation.split('[').next().unwrap_or(annotation).trim();
    let base = base.rsplit('.').next().unwrap_or(base);
    NON_FIELD_ANNOTATIONS.contains(&base)
}

fn is_field_call<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.kind().as_ref() == "call"
        && node.field("function").is_some_and(|f| {
            let target = f.text();
            target.as_ref() == "field" || target.ends_with(".field")
        })
}

/// Names of methods defined directly in the class body, private ones included.
pub(crate) fn defined_methods<D: ast_grep_core::Doc>(class: &Node<D>) -> Vec<String> {
    let Some(body) = class.field("body") else {
        return Vec::new();
    };
    body.children()
        .filter_map(|child| match child.kind().as_ref() {
            "function_definition" => definition_name(&child),
            "decorated_definition" => child
                .field("definition")
                .filter(|d| d.kind().as_ref() == "function_definition")
                .and_then(|d| definition_name(&d)),
            _ => None,
        })
        .collect()
}

/// Canonical methods the dataclass machinery generates for `options`,
/// minus the ones the class writes itself.
#[must_use]
pub fn auto_derived_methods(options: &DataclassOptions, defined: &[String]) -> Vec<String> {
    CANONICAL_METHODS
        .iter()
        .filter(|name| generates(options, name))
        .filter(|name| !defined.iter().any(|d| d == *name))
        .map(|name| (*name).to_string())
        .collect()
}

fn generates(options: &DataclassOptions, method: &str) -> bool {
    match method {
        "__init__" => options.init,
        "__repr__" => options.repr,
        "__eq__" => options.eq,
        "__hash__" => options.unsafe_hash || (options.eq && options.frozen),
        m if ORDERING_METHODS.contains(&m) => options.order,
        _ => false,
    }
}
