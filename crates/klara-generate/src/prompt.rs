//! Prompt template for test generation.

/// Prompt asking the model for pytest tests of `code`.
#[must_use]
pub fn build_prompt(code: &str) -> String {
    format!(
        "
Generate comprehensive pytest unit tests for the following Python code:

```python
{code}
```

The tests should:
1. Cover all functions and methods
2. Include edge cases
3. Be well-organized and documented
4. Follow pytest best practices
5. Be ready to run without modifications
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_fenced_verbatim() {
        let code = "def add(a, b):\n    return a + b";
        let prompt = build_prompt(code);
        assert!(prompt.contains("```python\ndef add(a, b):\n    return a + b\n```"));
    }

    #[test]
    fn lists_all_requirements() {
        let prompt = build_prompt("x = 1");
        for line in [
            "1. Cover all functions and methods",
            "2. Include edge cases",
            "3. Be well-organized and documented",
            "4. Follow pytest best practices",
            "5. Be ready to run without modifications",
        ] {
            assert!(prompt.contains(line), "missing: {line}");
        }
    }
}
