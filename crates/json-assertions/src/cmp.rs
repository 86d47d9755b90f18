use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

/// Deep equality where numbers compare by value, so `1` equals `1.0`.
#[inline]
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Null, Value::Null) => true,
        (Value::Number(left), Value::Number(right)) => equal_numbers(left, right),
        (Value::Array(left), Value::Array(right)) => equal_arrays(left, right),
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => false,
    }
}

#[inline]
pub(crate) fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| equal(a, b))
}

/// Key order is irrelevant for objects.
#[inline]
pub(crate) fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).is_some_and(|other| equal(value, other)))
}

#[inline]
pub(crate) fn equal_numbers(left: &Number, right: &Number) -> bool {
    if let Some(left) = left.as_u64() {
        if let Some(right) = right.as_u64() {
            left == right
        } else if let Some(right) = right.as_i64() {
            NumCmp::num_eq(left, right)
        } else {
            right.as_f64().is_some_and(|right| NumCmp::num_eq(left, right))
        }
    } else if let Some(left) = left.as_i64() {
        if let Some(right) = right.as_u64() {
            NumCmp::num_eq(left, right)
        } else if let Some(right) = right.as_i64() {
            left == right
        } else {
            right.as_f64().is_some_and(|right| NumCmp::num_eq(left, right))
        }
    } else {
        let Some(left) = left.as_f64() else {
            return false;
        };
        if let Some(right) = right.as_u64() {
            NumCmp::num_eq(left, right)
        } else if let Some(right) = right.as_i64() {
            NumCmp::num_eq(left, right)
        } else {
            right.as_f64().is_some_and(|right| NumCmp::num_eq(left, right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::equal;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(1), &json!(1.0); "integer and float")]
    #[test_case(&json!(-3), &json!(-3.0); "negative integer and float")]
    #[test_case(&json!(u64::MAX), &json!(u64::MAX); "large unsigned")]
    #[test_case(&json!([1, {"a": 2}]), &json!([1.0, {"a": 2}]); "nested")]
    #[test_case(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1}); "key order")]
    #[test_case(&json!(null), &json!(null); "null")]
    fn equal_values(left: &Value, right: &Value) {
        assert!(equal(left, right));
        assert!(equal(right, left));
    }

    #[test_case(&json!(1), &json!("1"); "number and string")]
    #[test_case(&json!(1), &json!(1.5); "different numbers")]
    #[test_case(&json!(-1), &json!(1); "sign")]
    #[test_case(&json!([1, 2]), &json!([2, 1]); "array order")]
    #[test_case(&json!([1]), &json!([1, 1]); "array length")]
    #[test_case(&json!({"a": 1}), &json!({"a": 1, "b": 1}); "extra key")]
    #[test_case(&json!({"a": 1}), &json!({"b": 1}); "different key")]
    #[test_case(&json!(null), &json!(false); "null and false")]
    fn different_values(left: &Value, right: &Value) {
        assert!(!equal(left, right));
        assert!(!equal(right, left));
    }
}
