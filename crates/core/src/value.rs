//! Conversions between memory values and renderable text.

use serde_json::Value;

/// Render a memory value as prompt text.
///
/// Strings render as-is (no surrounding quotes), `null` renders empty,
/// and everything else renders as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_render_unquoted() {
        assert_eq!(value_to_string(&json!("hello")), "hello");
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(value_to_string(&Value::Null), "");
    }

    #[test]
    fn structures_render_as_json() {
        assert_eq!(value_to_string(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(true)), "true");
    }
}
