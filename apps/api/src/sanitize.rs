//! Sanitizers for loosely-structured model output.
//!
//! The model is *asked* for JSON by prompt text, so the reply routinely
//! arrives wrapped in markdown code fences or surrounded by prose. Nothing
//! here validates structure; parsing is the caller's job.

/// Removes every line whose trimmed content starts with a markdown code-fence
/// marker and rejoins the rest with newlines.
pub fn clean_markdown_json(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locates the first balanced JSON value (object or array) in `text`,
/// ignoring any fencing or prose around it.
///
/// Brackets inside JSON strings are skipped, as are escaped quotes. Returns
/// `None` when no opener is found or the value never closes.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markdown_json_strips_fence_lines() {
        let input = "```json\n[{\"title\":\"A\"}]\n```";
        assert_eq!(clean_markdown_json(input), "[{\"title\":\"A\"}]");
    }

    #[test]
    fn test_clean_markdown_json_handles_indented_fences() {
        let input = "  ```json\n{\"a\": 1}\n  ```";
        assert_eq!(clean_markdown_json(input), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_markdown_json_no_fences() {
        let input = "{\"a\": 1}";
        assert_eq!(clean_markdown_json(input), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_from_fenced_block() {
        let input = "```json\n[{\"title\":\"A\"}]\n```";
        assert_eq!(extract_json(input), Some("[{\"title\":\"A\"}]"));
    }

    #[test]
    fn test_extract_json_ignores_surrounding_prose() {
        let input = "Here is the analysis you asked for:\n{\"role\": \"Dev\"}\nHope it helps!";
        assert_eq!(extract_json(input), Some("{\"role\": \"Dev\"}"));
    }

    #[test]
    fn test_extract_json_skips_brackets_in_strings() {
        let input = "{\"note\": \"array [1, 2] and brace } inside\"}";
        assert_eq!(extract_json(input), Some(input));
    }

    #[test]
    fn test_extract_json_handles_escaped_quotes() {
        let input = "noise {\"quote\": \"she said \\\"hi}\\\"\"} trailer";
        assert_eq!(
            extract_json(input),
            Some("{\"quote\": \"she said \\\"hi}\\\"\"}")
        );
    }

    #[test]
    fn test_extract_json_unterminated_returns_none() {
        assert_eq!(extract_json("{\"open\": ["), None);
        assert_eq!(extract_json("no json here"), None);
    }
}
