use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        anyhow!("at JSON path {path} → {}", err.into_inner())
    })
}

/// One document per non-blank line. Errors name the 1-based line.
pub fn ndjson_with_path<T: DeserializeOwned>(src: &str) -> Result<Vec<T>> {
    src.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            from_str_with_path(line).map_err(|e| anyhow!("line {}: {e}", i + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn syntax_errors_carry_the_path() {
        let err = from_str_with_path::<Value>(r#"{"a": {"b": [1, }]}}"#).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("at JSON path a.b"), "{msg}");
    }

    #[test]
    fn ndjson_skips_blank_lines_and_numbers_errors() {
        let docs = ndjson_with_path::<Value>("{\"a\":1}\n\n{\"a\":2}\n").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"a": 2})]);

        let err = ndjson_with_path::<Value>("{\"a\":1}\n{oops}\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"), "{err}");
    }
}
