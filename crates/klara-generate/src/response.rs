//! Pull test code out of a model response.

const PYTHON_FENCE: &str = "```python";
const FENCE: &str = "```";

/// The test code inside `response`.
///
/// Prefers the first ```` ```python ```` block (content trimmed). Without
/// one, the whole response is used, cut to start at the first `import x`
/// or `from x import` unless it already starts with `import`.
#[must_use]
pub fn extract_test_code(response: &str) -> String {
    if let Some(block) = fenced_python_block(response) {
        return block.to_string();
    }
    if response.starts_with("import") {
        return response.to_string();
    }
    match first_import(response) {
        Some(start) => response[start..].to_string(),
        None => response.to_string(),
    }
}

fn fenced_python_block(response: &str) -> Option<&str> {
    let open = response.find(PYTHON_FENCE)?;
    let body = response[open + PYTHON_FENCE.len()..].trim_start();
    let close = body.find(FENCE)?;
    Some(body[..close].trim_end())
}

/// Byte offset of the earliest `import <word>` or `from <word> import`.
fn first_import(text: &str) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .find(|&idx| {
            let rest = &text[idx..];
            rest.strip_prefix("import ").is_some_and(starts_with_word)
                || rest
                    .strip_prefix("from ")
                    .and_then(skip_word)
                    .is_some_and(|after| after.starts_with(" import"))
        })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn starts_with_word(text: &str) -> bool {
    text.starts_with(is_word_char)
}

/// Rest of `text` after a non-empty run of word characters.
fn skip_word(text: &str) -> Option<&str> {
    let end = text.find(|c: char| !is_word_char(c)).unwrap_or(text.len());
    (end > 0).then(|| &text[end..])
}
