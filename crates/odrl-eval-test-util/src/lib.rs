//! Shared test utilities for the odrl-eval workspace.
//!
//! Lives in its own crate because `xtask` normalizes reports at runtime when it refreshes the
//! expected fixtures, not only under `#[cfg(test)]`.

use serde_json::Value;

/// Normalize non-deterministic JSON fields of a case report for golden-file comparison.
///
/// - `tool.version` is replaced with `"__VERSION__"`, only on a root object that looks like a
///   case report (`schema`, `tool`, `case`, `verdict`, `trace`).
/// - `started_at` / `finished_at` are replaced with `"__TIMESTAMP__"` at any depth.
///
/// The trace digest is kept: it depends only on the graph and presets.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_case_report = ["schema", "tool", "case", "verdict", "trace"]
            .iter()
            .all(|key| obj.contains_key(*key));
        if is_case_report
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps(&mut value);
    value
}

fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps(val);
            }
        }
        _ => {}
    }
}

/// Replace the `-- on/at <timestamp>` suffix of the START / CLOSING lines of a case log.
pub fn normalize_case_log(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        match line.split_once("  -- on/at ") {
            Some((head, _)) => {
                out.push_str(head);
                out.push_str("  -- on/at __TIMESTAMP__");
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}
