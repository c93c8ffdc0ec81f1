//! Dot-path lookups over JSON request bodies.
//!
//! `a.b.0` walks object keys and array indices; `\.` escapes a dot inside a
//! key. Resolved values are rendered as plain strings: strings verbatim,
//! numbers in plain decimal notation, booleans as `true`/`false`, objects and
//! arrays as compact JSON, `null` and unresolved paths as the empty string.
//! When an object repeats a key, the last occurrence wins.

use serde_json::{Number, Value};

/// Evaluates `path` against the raw JSON `body`.
pub fn query(body: &[u8], path: &str) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return String::new();
    };
    lookup(&value, path).map(render).unwrap_or_default()
}

pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    segments(path)
        .iter()
        .try_fold(value, |current, key| match current {
            Value::Object(map) => map.get(key.as_str()),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => render_number(n),
        other => other.to_string(),
    }
}

// Integers verbatim; floats in shortest plain decimal (`1.0` → `1`, `1e3` → `1000`).
fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    n.as_f64().map(|f| f.to_string()).unwrap_or_default()
}

fn segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
}
