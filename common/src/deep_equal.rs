//! Structural equality that skips named fields.

use serde_json::Value;

/// Compares two JSON values structurally, ignoring object members whose name is in
/// `ignored` at any depth.
///
/// Filter values travel with a `toQuery` member that is derived from the rest of
/// the value; comparing it would make every propagation look like a change.
pub fn deep_equal_ignoring(a: &Value, b: &Value, ignored: &[&str]) -> bool {
    match (a, b) {
        (Value::Object(left), Value::Object(right)) => {
            let left_keys = left.keys().filter(|k| !ignored.contains(&k.as_str()));
            let right_count = right.keys().filter(|k| !ignored.contains(&k.as_str())).count();
            let mut left_count = 0;
            for key in left_keys {
                left_count += 1;
                match right.get(key) {
                    Some(rv) => {
                        if !deep_equal_ignoring(&left[key], rv, ignored) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            left_count == right_count
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(l, r)| deep_equal_ignoring(l, r, ignored))
        }
        _ => a == b,
    }
}
