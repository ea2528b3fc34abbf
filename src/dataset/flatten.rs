//! Depth-unlimited flattening of the dataset's nested-array shape.
//!
//! The raw `gods` and `items` collections are arrays of arrays of arrays with
//! holes. Everything downstream wants a flat list in depth-first order.

use serde_json::Value;

/// Returns `true` for values a JSON consumer would treat as falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Flattens an arbitrarily nested array into its non-falsy leaves.
///
/// Left-to-right depth-first order is preserved. A scalar or object yields
/// itself (unless falsy), `null` yields nothing. Never panics.
pub fn flatten_any(value: &Value) -> Vec<&Value> {
    let mut out = Vec::new();
    push_leaves(value, &mut out);
    out
}

fn push_leaves<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(children) => {
            for child in children {
                push_leaves(child, out);
            }
        }
        leaf if is_falsy(leaf) => {}
        leaf => out.push(leaf),
    }
}
