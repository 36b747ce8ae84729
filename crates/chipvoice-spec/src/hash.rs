//! Canonical JSON hashing.
//!
//! Reports identify the configuration that produced a render by hashing its
//! canonical JSON form:
//!
//! ```text
//! config_hash = hex(BLAKE3(JCS(config_json)))
//! ```
//!
//! Where JCS is the JSON Canonicalization Scheme per RFC 8785: sorted object
//! keys, no insignificant whitespace, minimal number and string forms.

/// Computes the canonical BLAKE3 hash of a JSON value.
///
/// # Returns
/// A 64-character lowercase hexadecimal string
///
/// # Example
/// ```
/// use chipvoice_spec::hash::canonical_value_hash;
///
/// let a = canonical_value_hash(&serde_json::json!({"b": 1, "a": 2}));
/// let b = canonical_value_hash(&serde_json::json!({"a": 2, "b": 1}));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        }
        _ => "null".to_string(),
    }
}

fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_sorted() {
        assert_eq!(
            canonicalize_json(&json!({"b": true, "a": [1, "x"]})),
            r#"{"a":[1,"x"],"b":true}"#
        );
    }

    #[test]
    fn test_numbers_are_minimal() {
        assert_eq!(canonicalize_json(&json!(1.0)), "1");
        assert_eq!(canonicalize_json(&json!(0.25)), "0.25");
        assert_eq!(canonicalize_json(&json!(-0.0)), "0");
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(canonicalize_json(&json!("a\"b\n")), r#""a\"b\n""#);
    }
}
