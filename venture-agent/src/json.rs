//! Helpers for treating model responses as untrusted input.
//!
//! Every model response is unstructured text that is merely *expected* to
//! contain JSON. These helpers strip markdown fencing, locate the first
//! balanced object, and - when strict parsing fails - recover individual
//! string fields by key.

use regex::Regex;
use std::collections::BTreeMap;

/// Strip a surrounding markdown code fence (```json ... ``` or ``` ... ```).
pub fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", ...) up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim().strip_suffix("```").map(str::trim).unwrap_or(body.trim())
}

/// Locate the first balanced JSON object in `raw`, tolerating prose before
/// and after it. Returns the exact `{...}` slice.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let text = strip_fences(raw);
    let start = text.find('{')?;
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
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Recover named string sections from a model response.
///
/// Strict path: parse the first JSON object and take the values of the known
/// keys (non-string values are serialized). Fallback path: per-key regex
/// recovery from partial or truncated JSON. Either way, only the known keys
/// are returned; the caller pads the rest with the sentinel.
pub fn recover_sections(raw: &str, keys: &[&str]) -> BTreeMap<String, String> {
    if let Some(object) = extract_json_object(raw) {
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(object) {
            let mut sections = BTreeMap::new();
            for key in keys {
                if let Some(value) = map.get(*key) {
                    let text = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    sections.insert((*key).to_string(), text);
                }
            }
            if !sections.is_empty() {
                return sections;
            }
        }
    }
    recover_sections_by_key(raw, keys)
}

fn recover_sections_by_key(raw: &str, keys: &[&str]) -> BTreeMap<String, String> {
    let mut sections = BTreeMap::new();
    for key in keys {
        let pattern = format!(r#""{}"\s*:\s*"((?:[^"\\]|\\.)*)""#, regex::escape(key));
        let Ok(re) = Regex::new(&pattern) else { continue };
        if let Some(captures) = re.captures(raw) {
            let escaped = &captures[1];
            // Round-trip through serde to resolve \n, \", \uXXXX escapes.
            let value: String = serde_json::from_str(&format!("\"{escaped}\""))
                .unwrap_or_else(|_| escaped.to_string());
            sections.insert((*key).to_string(), value);
        }
    }
    sections
}
