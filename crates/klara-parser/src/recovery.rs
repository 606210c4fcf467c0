//! Decorator-inclusive class source recovery.
//!
//! Strategies run in order and the first one that produces text wins:
//!
//! 1. [`NodeText`]: lines covered by the node found at load time.
//! 2. [`Reparse`]: re-read the file, parse it again, and bound the class by
//!    indentation.
//! 3. [`RawLines`]: plain text scan for the `class` line, no syntax tree.
//!
//! When every strategy gives up, [`placeholder`] text is used so the rest of
//! the descriptor can still be returned.

use std::path::Path;

use tracing::debug;

use crate::lines::{
    has_dataclass_marker, header_end, indent_width, is_blank, sibling_scan_end, slice_definition,
};
use crate::parser::parse_python;
use crate::pyhelpers::{find_top_level_class, line_span};

/// How far above a `class` line a detached dataclass decorator is searched for.
const DETACHED_DECORATOR_WINDOW: usize = 20;

/// Everything a strategy may use to recover a class's text.
#[derive(Debug, Clone, Copy)]
pub struct RecoveryContext<'a> {
    pub class_name: &'a str,
    pub file_path: &'a Path,
    /// File content as loaded by the locator.
    pub content: &'a str,
    /// 0-based inclusive line span of the located (decorated) class node.
    pub node_span: Option<(usize, usize)>,
    pub is_aggregate: bool,
}

/// Outcome of one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    Found(String),
    /// Give way to the next strategy, with the reason.
    Next(String),
}

pub trait SourceStrategy {
    fn name(&self) -> &'static str;
    fn recover(&self, ctx: &RecoveryContext<'_>) -> Recovery;
}

/// Text of the node found while locating the class.
pub struct NodeText;

impl SourceStrategy for NodeText {
    fn name(&self) -> &'static str {
        "node-text"
    }

    fn recover(&self, ctx: &RecoveryContext<'_>) -> Recovery {
        let Some((start, end)) = ctx.node_span else {
            return Recovery::Next("no node span recorded".into());
        };
        let lines: Vec<&str> = ctx.content.lines().collect();
        let Some(text) = slice_definition(&lines, start, Some(end)) else {
            return Recovery::Next(format!("node span starts past end of file at line {start}"));
        };
        if text.trim().is_empty() {
            return Recovery::Next("node text is empty".into());
        }
        if ctx.is_aggregate && !has_dataclass_marker(&text) {
            return Recovery::Next("node text lacks the dataclass decorator".into());
        }
        Recovery::Found(text)
    }
}

/// Parse the file again and bound the class by its indentation siblings.
pub struct Reparse;

impl SourceStrategy for Reparse {
    fn name(&self) -> &'static str {
        "reparse"
    }

    fn recover(&self, ctx: &RecoveryContext<'_>) -> Recovery {
        let content = match std::fs::read_to_string(ctx.file_path) {
            Ok(content) => content,
            Err(error) => return Recovery::Next(format!("cannot re-read file: {error}")),
        };
        let tree = parse_python(&content);
        let root = tree.root();
        let Some((outer, class)) = find_top_level_class(&root, ctx.class_name) else {
            return Recovery::Next("class node not found after re-parse".into());
        };

        let lines: Vec<&str> = content.lines().collect();
        let (start, _) = line_span(&outer);
        let (class_line, _) = line_span(&class);
        let Some(class_text) = lines.get(class_line) else {
            return Recovery::Next("class line past end of file".into());
        };
        let header = header_end(&lines, class_line);
        let end = sibling_scan_end(&lines, header, indent_width(class_text));

        match slice_definition(&lines, start, Some(end.saturating_sub(1))) {
            Some(text) => Recovery::Found(text),
            None => Recovery::Next("empty slice after re-parse".into()),
        }
    }
}

/// Text scan for `class <name>`, independent of any parse.
pub struct RawLines;

impl SourceStrategy for RawLines {
    fn name(&self) -> &'static str {
        "raw-lines"
    }

    fn recover(&self, ctx: &RecoveryContext<'_>) -> Recovery {
        let lines: Vec<&str> = ctx.content.lines().collect();
        let Some(class_line) = lines
            .iter()
            .position(|line| is_class_line(line, ctx.class_name))
        else {
            return Recovery::Next(format!("no `class {}` line in file", ctx.class_name));
        };

        let start = decorator_block_start(&lines, class_line);
        let header = header_end(&lines, class_line);
        let end = sibling_scan_end(&lines, header, indent_width(lines[class_line]));
        let last = end.saturating_sub(1);

        let Some(text) = slice_definition(&lines, start, Some(last)) else {
            return Recovery::Next("empty slice".into());
        };
        if !ctx.is_aggregate || has_dataclass_marker(&text) {
            return Recovery::Found(text);
        }

        let floor = start.saturating_sub(DETACHED_DECORATOR_WINDOW);
        let detached = (floor..start).rev().find(|&idx| {
            let line = lines[idx].trim_start();
            line.starts_with('@') && line.contains("dataclass")
        });
        match detached.and_then(|idx| slice_definition(&lines, idx, Some(last))) {
            Some(text) => Recovery::Found(text),
            None => Recovery::Next("dataclass decorator not found near class line".into()),
        }
    }
}

fn is_class_line(line: &str, name: &str) -> bool {
    line.trim_start()
        .strip_prefix("class ")
        .and_then(|rest| rest.trim_start().strip_prefix(name))
        .is_some_and(|rest| rest.starts_with(['(', ':']) || rest.starts_with(char::is_whitespace))
}

/// First line of the decorators (and blank lines) directly above `class_line`,
/// with leading blank lines dropped again.
fn decorator_block_start(lines: &[&str], class_line: usize) -> usize {
    let mut start = class_line;
    while start > 0 {
        let above = lines[start - 1];
        if is_blank(above) || above.trim_start().starts_with('@') {
            start -= 1;
        } else {
            break;
        }
    }
    while start < class_line && is_blank(lines[start]) {
        start += 1;
    }
    start
}

/// Source text used when no strategy recovers the class.
#[must_use]
pub fn placeholder(class_name: &str, file_path: &Path) -> String {
    format!(
        "# Source code for class {class_name} could not be recovered from {}",
        file_path.display()
    )
}

/// The standard strategy order.
#[must_use]
pub fn default_strategies() -> Vec<Box<dyn SourceStrategy>> {
    vec![Box::new(NodeText), Box::new(Reparse), Box::new(RawLines)]
}

/// Run `strategies` in order; the placeholder if none succeeds.
#[must_use]
pub fn recover_with(strategies: &[Box<dyn SourceStrategy>], ctx: &RecoveryContext<'_>) -> String {
    for strategy in strategies {
        match strategy.recover(ctx) {
            Recovery::Found(text) => return text,
            Recovery::Next(reason) => debug!(
                strategy = strategy.name(),
                class = ctx.class_name,
                path = %ctx.file_path.display(),
                %reason,
                "source strategy gave way"
            ),
        }
    }
    placeholder(ctx.class_name, ctx.file_path)
}

#[must_use]
pub fn recover_class_source(ctx: &RecoveryContext<'_>) -> String {
    recover_with(&default_strategies(), ctx)
}
