//! Line-based slicing of definitions out of a file's text.
//!
//! All indices are 0-based line numbers into `source.lines()`.

/// Leading whitespace width of a line, in bytes.
pub(crate) fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Last line of a (possibly multi-line) `def`/`class` header.
///
/// The header ends on the first line where every bracket opened since
/// `start` is closed again. Brackets inside string literals and comments
/// are ignored.
pub(crate) fn header_end(lines: &[&str], start: usize) -> usize {
    let mut depth: i32 = 0;
    for (idx, line) in lines.iter().enumerate().skip(start) {
        let mut quote: Option<char> = None;
        for ch in line.chars() {
            match quote {
                Some(q) if ch == q => quote = None,
                Some(_) => {}
                None => match ch {
                    '#' => break,
                    '\'' | '"' => quote = Some(ch),
                    '(' | '[' | '{' => depth += 1,
                    ')' | ']' | '}' => depth -= 1,
                    _ => {}
                },
            }
        }
        if depth <= 0 {
            return idx;
        }
    }
    lines.len().saturating_sub(1)
}

/// Last line of an indented block that starts at `start`.
///
/// The block runs until the last non-blank line indented strictly deeper
/// than the definition line, or to the end of the file.
pub(crate) fn indentation_end(lines: &[&str], start: usize) -> usize {
    let base = indent_width(lines[start]);
    let header = header_end(lines, start);
    let mut end = header;
    for (idx, line) in lines.iter().enumerate().skip(header + 1) {
        if is_blank(line) {
            continue;
        }
        if indent_width(line) <= base && !is_comment(line) {
            break;
        }
        end = idx;
    }
    end
}

/// Exclusive end of a class block found by scanning for its next sibling.
///
/// Scanning starts after `header`. The block ends at the first code line
/// indented at or left of `base_indent`.
///
/// String literals are not tracked: a column-0 line inside a multi-line
/// string in the class body ends the block there.
pub(crate) fn sibling_scan_end(lines: &[&str], header: usize, base_indent: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(header + 1)
        .find(|(_, line)| {
            !is_blank(line) && !is_comment(line) && indent_width(line) <= base_indent
        })
        .map_or(lines.len(), |(idx, _)| idx)
}

/// Pull `end` back over trailing blank lines and over comment lines that
/// sit at or left of `base_indent` (they belong to whatever follows).
pub(crate) fn trim_trailing(
    lines: &[&str],
    start: usize,
    mut end: usize,
    base_indent: usize,
) -> usize {
    while end > start {
        let line = lines[end];
        if is_blank(line) || (is_comment(line) && indent_width(line) <= base_indent) {
            end -= 1;
        } else {
            break;
        }
    }
    end
}

/// Join `lines[start..=end]` with `\n`, dropping trailing blank lines.
///
/// When `end` is unknown the block end is found by indentation.
/// Returns `None` when `start` is past the end of the file.
#[must_use]
pub fn slice_definition(lines: &[&str], start: usize, end: Option<usize>) -> Option<String> {
    if start >= lines.len() {
        return None;
    }
    let end = end
        .unwrap_or_else(|| indentation_end(lines, start))
        .min(lines.len() - 1);
    let end = trim_trailing(lines, start, end.max(start), indent_width(lines[start]));
    Some(lines[start..=end].join("\n"))
}

/// Whether `text` carries an `@...dataclass` decorator line.
#[must_use]
pub fn has_dataclass_marker(text: &str) -> bool {
    text.lines().any(|line| {
        let trimmed = line.trim_start();
        trimmed.starts_with('@') && trimmed.contains("dataclass")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn split(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[rstest]
    #[case("def f():\n    pass\n", 0)]
    #[case("def f(\n    a,\n    b,\n):\n    pass\n", 3)]
    #[case("def f(s=')'):\n    pass\n", 0)]
    #[case("def f(a,  # (\n      b):\n    pass\n", 1)]
    #[case("class A(Base, metaclass=M): pass\n", 0)]
    fn header_end_handles_brackets(#[case] source: &str, #[case] expected: usize) {
        assert_eq!(header_end(&split(source), 0), expected);
    }

    #[test]
    fn slice_with_known_end_drops_trailing_blanks() {
        let lines = split("def f():\n    return 1\n\n\ndef g():\n    pass\n");
        assert_eq!(
            slice_definition(&lines, 0, Some(3)).unwrap(),
            "def f():\n    return 1"
        );
    }

    #[test]
    fn slice_without_end_scans_indentation() {
        let source = "def another_function(\n    n1: int,\n    n2: int\n):\n    return n2 > n1\n\nx = 3\n";
        let lines = split(source);
        assert_eq!(
            slice_definition(&lines, 0, None).unwrap(),
            "def another_function(\n    n1: int,\n    n2: int\n):\n    return n2 > n1"
        );
    }

    #[test]
    fn indentation_scan_keeps_inner_blank_lines_and_runs_to_eof() {
        let lines = split("def f():\n    a = 1\n\n    return a\n");
        assert_eq!(indentation_end(&lines, 0), 3);
        assert_eq!(
            slice_definition(&lines, 0, None).unwrap(),
            "def f():\n    a = 1\n\n    return a"
        );
    }

    #[test]
    fn trailing_dedented_comment_is_dropped() {
        let lines = split("def f():\n    return 1\n# next section\n");
        assert_eq!(
            slice_definition(&lines, 0, Some(2)).unwrap(),
            "def f():\n    return 1"
        );
    }

    #[test]
    fn slice_past_eof_is_none() {
        let lines = split("x = 1\n");
        assert_eq!(slice_definition(&lines, 5, None), None);
    }

    #[test]
    fn sibling_scan_stops_at_next_top_level_statement() {
        let source = "class A:\n    def m(self):\n        pass\n\n    def n(self):\n        pass\n\nclass B:\n    pass\n";
        let lines = split(source);
        assert_eq!(sibling_scan_end(&lines, 0, 0), 7);
    }

    #[test]
    fn sibling_scan_ignores_column_zero_comments() {
        let source = "class A:\n    x = 1\n# about m\n    def m(self):\n        pass\n";
        let lines = split(source);
        assert_eq!(sibling_scan_end(&lines, 0, 0), lines.len());
    }

    #[rstest]
    #[case("@dataclass\nclass A:\n    x: int", true)]
    #[case("@dataclasses.dataclass(frozen=True)\nclass A:\n    x: int", true)]
    #[case("class A:\n    x: int", false)]
    #[case("class A:\n    # dataclass-like\n    x: int", false)]
    fn dataclass_marker_detection(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(has_dataclass_marker(text), expected);
    }

    #[test]
    fn sibling_scan_stops_at_column_zero_string_content() {
        let lines = split("class A:\n    doc = \"\"\"\nflush left\n\"\"\"\n    x = 1\n");
        assert_eq!(sibling_scan_end(&lines, 0, 0), 2);
    }
}
