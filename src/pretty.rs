//! Multi-line rendering of resources for `Display`.

use serde_json::Value;

/// Renders `value` as
///
/// ```text
/// TypeName(
///     field='value',
///     other=3
/// )
/// ```
///
/// Keys are converted to snake_case; nested objects are indented.
pub fn prettyprint(type_name: &str, value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, Some(type_name), value, 0);
    out
}

fn write_value(out: &mut String, type_name: Option<&str>, value: &Value, depth: usize) {
    match value {
        Value::Object(map) if map.is_empty() => {
            out.push_str(type_name.unwrap_or(""));
            out.push_str("()");
        }
        Value::Object(map) => {
            out.push_str(type_name.unwrap_or(""));
            out.push_str(if type_name.is_some() { "(\n" } else { "{\n" });
            let indent = "    ".repeat(depth + 1);
            let mut entries = map.iter().peekable();
            while let Some((key, val)) = entries.next() {
                out.push_str(&indent);
                out.push_str(&to_snake_case(key));
                out.push('=');
                write_value(out, None, val, depth + 1);
                if entries.peek().is_some() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&"    ".repeat(depth));
            out.push(if type_name.is_some() { ')' } else { '}' });
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, None, item, depth);
            }
            out.push(']');
        }
        Value::String(s) => write_quoted(out, s),
        other => out.push_str(&other.to_string()),
    }
}

/// Single-quoted, escaping quotes, backslashes and control characters.
fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = u32::from(c);
                if code <= 0xff {
                    out.push_str(&format!("\\x{code:02x}"));
                } else {
                    out.push_str(&format!("\\u{code:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn to_snake_case(key: &str) -> String {
    let mut snake = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            snake.push('_');
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_prettyprint_nested() {
        let value = json!({
            "name": "cachedContents/abc",
            "usageMetadata": {"totalTokenCount": 12},
            "tools": []
        });

        let expected = "\
CachedContent(
    name='cachedContents/abc',
    tools=[],
    usage_metadata={
        total_token_count=12
    }
)";
        assert_eq!(prettyprint("CachedContent", &value), expected);
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("expireTime"), "expire_time");
        assert_eq!(to_snake_case("name"), "name");
    }

    #[test]
    fn test_strings_are_escaped() {
        let value = json!({"displayName": "it's a\\b\nc\u{1}"});

        assert_eq!(
            prettyprint("CachedContent", &value),
            "CachedContent(\n    display_name='it\\'s a\\\\b\\nc\\x01'\n)"
        );
    }

    #[test]
    fn test_empty_record() {
        assert_eq!(prettyprint("Model", &json!({})), "Model()");
    }
}
