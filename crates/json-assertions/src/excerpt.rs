//! Shortened copies of JSON documents for failure messages.
use serde_json::{Map, Value};

use crate::path::{Segment, Segments};

/// Key under which an excerpted object lists every key it originally had.
pub const ADDITIONAL_KEYS: &str = "__additional keys__";

/// Produce a shortened copy of `node` that follows `path`.
///
/// Arrays keep only their first element, followed by a `"... (N total) ..."` marker when they
/// had more than one. Objects keep only the key named by the next path segment and list all
/// original keys under [`ADDITIONAL_KEYS`]; once the path is exhausted, or when the next segment
/// is an index, objects keep every key. Scalars are returned as they are.
///
/// The path is read leniently: a missing leading `/` or an empty path are both accepted.
///
/// ```rust
/// use json_assertions::excerpt;
/// use serde_json::json;
///
/// let document = json!({"users": [1, 2, 3], "total": 3});
/// assert_eq!(
///     excerpt(&document, "/users"),
///     json!({"users": [1, "... (3 total) ..."], "__additional keys__": ["users", "total"]})
/// );
/// ```
#[must_use]
pub fn excerpt(node: &Value, path: &str) -> Value {
    let mut segments = Segments::new(path);
    let first = segments.next();
    let rest = segments.as_str();
    match node {
        Value::Array(items) => excerpt_array(items, rest),
        Value::Object(map) => match first {
            Some(Segment::Key(key)) => excerpt_branch(map, key, rest),
            Some(Segment::Index(_)) | None => map
                .iter()
                .map(|(key, value)| (key.clone(), excerpt(value, rest)))
                .collect::<Map<_, _>>()
                .into(),
        },
        _ => node.clone(),
    }
}

fn excerpt_array(items: &[Value], rest: &str) -> Value {
    let mut out = Vec::with_capacity(2);
    if let Some(head) = items.first() {
        out.push(excerpt(head, rest));
    }
    if items.len() > 1 {
        out.push(Value::String(format!("... ({} total) ...", items.len())));
    }
    Value::Array(out)
}

fn excerpt_branch(map: &Map<String, Value>, key: &str, rest: &str) -> Value {
    let mut out = Map::new();
    if let Some(value) = map.get(key) {
        out.insert(key.to_string(), excerpt(value, rest));
    }
    if map.keys().any(|other| other != key) {
        out.insert(
            ADDITIONAL_KEYS.to_string(),
            map.keys().cloned().map(Value::String).collect(),
        );
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::{excerpt, ADDITIONAL_KEYS};
    use serde_json::{json, Value};
    use test_case::test_case;

    fn users() -> Value {
        json!({
            "users": [
                {"id": 1, "name": "Bob"},
                {"id": 2, "name": "Sally"}
            ],
            "meta": {"page": 1}
        })
    }

    #[test]
    fn five_integers() {
        let out = excerpt(&json!([1, 2, 3, 4, 5]), "");
        assert_eq!(out, json!([1, "... (5 total) ..."]));
        assert_eq!(out.as_array().map(Vec::len), Some(2));
    }

    #[test_case(&json!([]), &json!([]); "empty array")]
    #[test_case(&json!([7]), &json!([7]); "single element")]
    #[test_case(&json!("text"), &json!("text"); "string")]
    #[test_case(&json!(null), &json!(null); "null")]
    #[test_case(&json!(4.5), &json!(4.5); "number")]
    fn unchanged_shapes(node: &Value, expected: &Value) {
        assert_eq!(&excerpt(node, "/anything"), expected);
    }

    #[test]
    fn follows_the_path() {
        assert_eq!(
            excerpt(&users(), "/users/0/name"),
            json!({
                "users": [
                    {"name": "Bob", ADDITIONAL_KEYS: ["id", "name"]},
                    "... (2 total) ..."
                ],
                ADDITIONAL_KEYS: ["users", "meta"]
            })
        );
    }

    #[test]
    fn empty_path_keeps_keys_but_shortens_arrays() {
        assert_eq!(
            excerpt(&users(), ""),
            json!({
                "users": [{"id": 1, "name": "Bob"}, "... (2 total) ..."],
                "meta": {"page": 1}
            })
        );
    }

    #[test]
    fn absent_key_leaves_only_the_key_list() {
        assert_eq!(
            excerpt(&users(), "/admins"),
            json!({ADDITIONAL_KEYS: ["users", "meta"]})
        );
    }

    #[test]
    fn sole_key_has_no_key_list() {
        assert_eq!(
            excerpt(&json!({"only": [1, 2]}), "/only"),
            json!({"only": [1, "... (2 total) ..."]})
        );
    }

    #[test]
    fn index_segment_on_object_keeps_all_keys() {
        assert_eq!(
            excerpt(&json!({"a": [1, 2], "b": 3}), "/0/a"),
            json!({"a": [1, "... (2 total) ..."], "b": 3})
        );
    }

    #[test]
    fn keys_keep_document_order() {
        let out = excerpt(&json!({"z": 1, "a": 2, "m": 3}), "/a");
        let keys = out[ADDITIONAL_KEYS]
            .as_array()
            .expect("Key list")
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn does_not_mutate_the_source() {
        let document = users();
        let before = document.clone();
        let _ = excerpt(&document, "/users/1/id");
        assert_eq!(document, before);
    }
}
