//! Dotted-path projection into JSON documents
//!
//! A path such as `attributes.url` is split on `.` and walked segment by
//! segment. Arrays fan out: the rest of the path is applied to every element
//! and the non-null results are collected into an array. Missing members
//! and scalars in the middle of a path project to `null`.

use serde_json::Value;

/// Project `document` at `path`.
///
/// An empty path returns the whole document.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use soupstore_core::project;
///
/// let doc = json!({"attributes": {"type": "Account"}, "lines": [{"qty": 1}, {"qty": 2}]});
/// assert_eq!(project(&doc, "attributes.type"), json!("Account"));
/// assert_eq!(project(&doc, "lines.qty"), json!([1, 2]));
/// assert_eq!(project(&doc, "missing.path"), json!(null));
/// ```
pub fn project(document: &Value, path: &str) -> Value {
    if path.is_empty() {
        return document.clone();
    }
    let segments: Vec<&str> = path.split('.').collect();
    project_segments(document, &segments)
}

fn project_segments(value: &Value, segments: &[&str]) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return value.clone();
    };
    match value {
        Value::Array(items) => {
            let projected: Vec<Value> = items
                .iter()
                .map(|item| project_segments(item, segments))
                .filter(|v| !v.is_null())
                .collect();
            if projected.is_empty() {
                Value::Null
            } else {
                Value::Array(projected)
            }
        }
        Value::Object(fields) => match fields.get(*head) {
            Some(next) => project_segments(next, rest),
            None => Value::Null,
        },
        _ => Value::Null,
    }
}
