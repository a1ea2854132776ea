//! Change summaries for audit entries
//!
//! Compares the JSON form of a record before and after an edit and lists
//! the changed fields, descending into nested objects (`start.month`).
//! Bookkeeping timestamps are left out.

use serde_json::Value;

const IGNORED_FIELDS: [&str; 2] = ["created_at", "updated_at"];
const MAX_STRING_CHARS: usize = 50;

/// Summarize the differences between two JSON values
///
/// Returns `None` when nothing but ignored fields changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect_changes(before: &Value, after: &Value, prefix: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                let path = field_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) => collect_changes(before_val, after_val, &path, changes),
                    None => changes.push(format!("{}: {} -> (removed)", path, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        field_path(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        _ if before != after => {
            let label = if prefix.is_empty() { "value" } else { prefix };
            changes.push(format!(
                "{}: {} -> {}",
                label,
                format_value(before),
                format_value(after)
            ));
        }
        _ => {}
    }
}

/// Format a JSON value for a one-line summary
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_change() {
        let before = json!({"note": "rent", "amount": 1000});
        let after = json!({"note": "rent", "amount": 1500});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 1000 -> 1500");
    }

    #[test]
    fn test_nested_range_change() {
        let before = json!({"start": {"year": 2025, "month": "Januar"}});
        let after = json!({"start": {"year": 2025, "month": "März"}});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "start.month: \"Januar\" -> \"März\"");
    }

    #[test]
    fn test_timestamps_ignored() {
        let before = json!({"amount": 1, "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"amount": 1, "updated_at": "2025-02-01T00:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"notes": "old"});
        let after = json!({"amount": 100});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("notes: \"old\" -> (removed)"));
        assert!(diff.contains("amount: (added) -> 100"));
    }

    #[test]
    fn test_scalar_values() {
        let diff = generate_diff(&json!(1), &json!(2)).unwrap();
        assert_eq!(diff, "value: 1 -> 2");
    }

    #[test]
    fn test_long_multibyte_string_truncation() {
        let long = "ä".repeat(80);
        let diff = generate_diff(&json!({"note": long}), &json!({"note": "kurz"})).unwrap();
        assert!(diff.contains("...\""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!("März")), "\"März\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1, "b": 2})), "{2 fields}");
    }
}
