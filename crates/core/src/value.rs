//! Comparison and text rendering over JSON values
//!
//! Predicates (range bounds, equality, smart-query comparators) use
//! [`compare_values`], which only orders values of the same kind. Sorting
//! uses [`sort_cmp`], a total order that ranks kinds first:
//! null < bool < number < string < array < object.

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Order two values of the same kind.
///
/// Numbers compare numerically (integers exactly, otherwise as `f64`),
/// strings lexicographically, booleans `false < true`. Anything else,
/// including null, is incomparable and yields `None`.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return Some(a.cmp(&b));
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}

/// Equality used by exact matches and external id lookups.
///
/// Comparable values are equal when they order as `Equal` (so `37` equals
/// `37.0`); everything else falls back to structural equality.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match compare_values(a, b) {
        Some(ordering) => ordering == Ordering::Equal,
        None => a == b,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order for sorting query results.
pub fn sort_cmp(a: &Value, b: &Value) -> Ordering {
    compare_values(a, b).unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b)))
}

/// Render a value as plain text.
///
/// Strings are returned without quotes, null renders empty, arrays join
/// their rendered elements with `,` and objects render as JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
