//! Path resolution against a JSON document.
use serde_json::Value;

use crate::{
    error::ResolutionError,
    path::{Segment, Segments},
    types::JsonType,
};

/// Follow `path` from `root` and return the value it addresses.
///
/// The path must start with `/`; `/` alone addresses the root. Empty segments are skipped, so
/// `/users/` and `/users` are the same path. A key that maps to `null` resolves to
/// [`Value::Null`], which is a different outcome from [`ResolutionError::NotFound`].
///
/// # Errors
///
/// - [`ResolutionError::InvalidPath`] if the path does not start with `/`.
/// - [`ResolutionError::NotFound`] if a key is absent, an index is past the end, or a segment
///   is applied to `null`.
/// - [`ResolutionError::TypeMismatch`] if an index is applied to a non-array or a key to a
///   non-object.
///
/// ```rust
/// use serde_json::json;
///
/// let document = json!({"users": [{"name": "Bob"}]});
/// assert_eq!(
///     json_assertions::resolve(&document, "/users/0/name"),
///     Ok(&json!("Bob"))
/// );
/// ```
pub fn resolve<'v>(root: &'v Value, path: &str) -> Result<&'v Value, ResolutionError> {
    if !path.starts_with('/') {
        return Err(ResolutionError::invalid_path(path));
    }
    resolve_relative(root, path)
}

/// Follow `path` from `node`, with or without a leading `/`.
pub(crate) fn resolve_relative<'v>(
    node: &'v Value,
    path: &str,
) -> Result<&'v Value, ResolutionError> {
    let result =
        Segments::new(path).try_fold(node, |current, segment| step(current, segment, path));
    tracing::trace!(path, found = result.is_ok(), "resolved JSON path");
    result
}

/// Apply a single segment to `current`.
#[inline]
fn step<'v>(
    current: &'v Value,
    segment: Segment<'_>,
    path: &str,
) -> Result<&'v Value, ResolutionError> {
    match (segment, current) {
        (Segment::Index(idx), Value::Array(items)) => items
            .get(idx)
            .ok_or_else(|| ResolutionError::not_found(path, segment)),
        (Segment::Key(key), Value::Object(map)) => map
            .get(key)
            .ok_or_else(|| ResolutionError::not_found(path, segment)),
        (_, Value::Null) => Err(ResolutionError::not_found(path, segment)),
        (Segment::Index(_), other) => Err(ResolutionError::type_mismatch(
            path,
            segment,
            JsonType::Array,
            JsonType::from(other),
        )),
        (Segment::Key(_), other) => Err(ResolutionError::type_mismatch(
            path,
            segment,
            JsonType::Object,
            JsonType::from(other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve, resolve_relative};
    use crate::{error::ResolutionError, types::JsonType};
    use serde_json::{json, Value};
    use test_case::test_case;

    fn users() -> Value {
        json!({
            "users": [
                {"id": 1, "name": "Bob", "nickname": null},
                {"id": 2, "name": "Sally"}
            ],
            "count": 2
        })
    }

    #[test_case("/users/0/name", &json!("Bob"); "nested key")]
    #[test_case("/users/1/id", &json!(2); "second element")]
    #[test_case("/count", &json!(2); "top-level key")]
    #[test_case("/users/0/nickname", &json!(null); "explicit null")]
    #[test_case("//users//0///name/", &json!("Bob"); "empty segments")]
    fn found(path: &str, expected: &Value) {
        let document = users();
        assert_eq!(resolve(&document, path), Ok(expected));
    }

    #[test_case("/"; "slash")]
    #[test_case("//"; "only slashes")]
    fn root(path: &str) {
        let document = users();
        assert_eq!(resolve(&document, path), Ok(&document));
    }

    #[test]
    fn trailing_slash() {
        let document = users();
        assert_eq!(resolve(&document, "/users/"), resolve(&document, "/users"));
    }

    #[test_case("/users/0/password", "password"; "absent key")]
    #[test_case("/users/2", "2"; "index past the end")]
    #[test_case("/users/99999999999999999999999", "18446744073709551615"; "huge index")]
    #[test_case("/admins/0", "admins"; "stops at the first missing key")]
    #[test_case("/users/0/nickname/first", "first"; "key below null")]
    #[test_case("/users/0/nickname/0", "0"; "index below null")]
    fn not_found(path: &str, segment: &str) {
        let document = users();
        assert_eq!(
            resolve(&document, path),
            Err(ResolutionError::NotFound {
                path: path.to_string(),
                segment: segment.to_string(),
            })
        );
    }

    #[test_case("/users/name", JsonType::Object, JsonType::Array; "key into array")]
    #[test_case("/users/0/0", JsonType::Array, JsonType::Object; "index into object")]
    #[test_case("/count/value", JsonType::Object, JsonType::Number; "key into number")]
    #[test_case("/users/0/name/0", JsonType::Array, JsonType::String; "index into string")]
    fn type_mismatch(path: &str, expected: JsonType, found: JsonType) {
        let document = users();
        match resolve(&document, path) {
            Err(ResolutionError::TypeMismatch {
                expected: e,
                found: f,
                ..
            }) => {
                assert_eq!(e, expected);
                assert_eq!(f, found);
            }
            other => panic!("Expected a type mismatch, got {other:?}"),
        }
    }

    #[test_case("users"; "no leading slash")]
    #[test_case(""; "empty")]
    fn invalid_path(path: &str) {
        let document = users();
        assert_eq!(
            resolve(&document, path),
            Err(ResolutionError::InvalidPath {
                path: path.to_string()
            })
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let document = users();
        let before = document.clone();
        let first = resolve(&document, "/users/1/name").cloned();
        let second = resolve(&document, "/users/1/name").cloned();
        assert_eq!(first, second);
        assert_eq!(document, before);
    }

    #[test_case("id", &json!(2); "bare key")]
    #[test_case("/id", &json!(2); "anchored key")]
    #[test_case("", &json!({"id": 2, "name": "Sally"}); "empty")]
    fn relative(path: &str, expected: &Value) {
        let document = users();
        let user = &document["users"][1];
        assert_eq!(resolve_relative(user, path), Ok(expected));
    }
}
