//! # json-assertions
//!
//! Assertions over JSON documents addressed by slash-delimited paths, for use in test suites.
//!
//! A path such as `/users/0/name` walks the document from its root: all-digit segments index
//! into arrays, every other segment looks up an object key. Empty segments are skipped, so
//! `/users/` and `/users` address the same value. There is no escaping, and no wildcards or
//! filters.
//!
//! When an assertion fails, its message ends with a shortened, pretty-printed copy of the
//! document that follows the failing path. Arrays keep only their first element and objects
//! off the path are collapsed into a key list, so the output stays small for large documents.
//!
//! ```rust
//! use json_assertions::{JsonTester, PanicReporter};
//! use serde_json::json;
//!
//! let document = json!({
//!     "users": [
//!         {"id": 1, "name": "Bob"},
//!         {"id": 2, "name": "Sally"}
//!     ]
//! });
//! let reporter = PanicReporter::new();
//! let json = JsonTester::new(&document, &reporter);
//! json.equal("Bob", "/users/0/name");
//! json.matches("o", "/users/0/name");
//! json.must_have("/users/1/name");
//! json.must_not_have("/users/1/password");
//! json.array_size_is(2, "/users");
//! json.array_map_equals([1, 2], "/users", "/id");
//! assert_eq!(reporter.passed(), 6);
//! ```
//!
//! Reporters connect assertions to a test framework. [`PanicReporter`] fails a `#[test]` by
//! panicking, [`RecordingReporter`] keeps every [`Outcome`], and any `Fn(bool, String)` closure
//! works as well.
mod cmp;
mod error;
mod excerpt;
mod finite;
mod options;
mod path;
mod regex;
mod reporter;
mod resolver;
mod tester;
mod types;

pub use error::{AssertionError, ResolutionError};
pub use excerpt::{excerpt, ADDITIONAL_KEYS};
pub use options::{AssertionOptions, PatternOptions};
pub use path::{Segment, Segments};
pub use reporter::{Outcome, PanicReporter, RecordingReporter, Reporter};
pub use resolver::resolve;
pub use tester::{IntoDocument, JsonTester, WithMessage};
pub use types::JsonType;

use serde::Serialize;
use serde_json::Value;

/// Create a builder for configuring a [`JsonTester`].
#[must_use]
pub fn options() -> AssertionOptions {
    AssertionOptions::default()
}

/// Build a tester over `json` and hand it to `block`.
///
/// ```rust
/// use json_assertions::{with_json, RecordingReporter};
///
/// let reporter = RecordingReporter::new();
/// let id = with_json(r#"{"users": [{"id": 1}]}"#, &reporter, |json| {
///     json.is_array("/users/");
///     json.value_at("/users/0/id").cloned()
/// });
/// assert_eq!(id, Some(serde_json::json!(1)));
/// assert_eq!(reporter.passed(), 1);
/// ```
pub fn with_json<'a, R, T>(
    json: impl IntoDocument<'a>,
    reporter: &'a R,
    block: impl FnOnce(&JsonTester<'a, R>) -> T,
) -> T
where
    R: Reporter + ?Sized,
{
    block(&JsonTester::new(json, reporter))
}

/// Re-format JSON text with indentation.
///
/// # Errors
///
/// If `json` is not valid JSON.
pub fn pretty_json(json: &str) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    serde_json::to_string_pretty(&value)
}

/// Assert that the value at `path` equals `expected`.
///
/// # Panics
///
/// If the assertion fails. The panic message includes an excerpt of `document`.
pub fn assert_json_equal(document: &Value, expected: impl Serialize, path: &str) {
    JsonTester::new(document, &PanicReporter::new()).equal(expected, path);
}

/// Assert that the string at `path` contains a match for `pattern`.
///
/// # Panics
///
/// If the assertion fails.
pub fn assert_json_match(document: &Value, pattern: &str, path: &str) {
    JsonTester::new(document, &PanicReporter::new()).matches(pattern, path);
}

/// Assert that `path` does not exist or holds `null`.
///
/// # Panics
///
/// If the assertion fails.
pub fn assert_json_missing(document: &Value, path: &str) {
    JsonTester::new(document, &PanicReporter::new()).must_not_have(path);
}

/// Assert that `path` holds a value other than `null`.
///
/// # Panics
///
/// If the assertion fails.
pub fn assert_json_has(document: &Value, path: &str) {
    JsonTester::new(document, &PanicReporter::new()).must_have(path);
}

/// Assert that `path` is an array of exactly `expected` elements.
///
/// # Panics
///
/// If the assertion fails.
pub fn assert_json_array_size(document: &Value, expected: usize, path: &str) {
    JsonTester::new(document, &PanicReporter::new()).array_size_is(expected, path);
}

/// Assert that `path` is an array.
///
/// # Panics
///
/// If the assertion fails.
pub fn assert_json_is_array(document: &Value, path: &str) {
    JsonTester::new(document, &PanicReporter::new()).is_array(path);
}

#[cfg(test)]
mod tests {
    use super::{
        assert_json_array_size, assert_json_equal, assert_json_has, assert_json_is_array,
        assert_json_match, assert_json_missing, pretty_json,
    };
    use serde_json::{json, Value};

    fn response() -> Value {
        json!({
            "users": [
                {"id": 1, "name": "Bob"},
                {"id": 2, "name": "Sally"}
            ]
        })
    }

    #[test]
    fn basic_assertions() {
        let document = response();
        assert_json_equal(&document, "Bob", "/users/0/name");
        assert_json_match(&document, "o", "/users/0/name");
        assert_json_missing(&document, "/users/0/password");
        assert_json_has(&document, "/users/1/name");
        assert_json_array_size(&document, 2, "/users");
        assert_json_is_array(&document, "/users/");
    }

    #[test]
    #[should_panic(expected = "JSON value \"Bob\" != \"XXX\" at path /users/0/name")]
    fn equal_failure() {
        assert_json_equal(&response(), "XXX", "/users/0/name");
    }

    #[test]
    #[should_panic(expected = "does not match /xxx/")]
    fn match_failure() {
        assert_json_match(&response(), "xxx", "/users/0/name");
    }

    #[test]
    #[should_panic(expected = "exists but expected to be missing")]
    fn missing_failure() {
        assert_json_missing(&response(), "/users/0/id");
    }

    #[test]
    #[should_panic(expected = "does not exist but is expected")]
    fn has_failure() {
        assert_json_has(&response(), "/users/1/password");
    }

    #[test]
    #[should_panic(expected = "expected to have 666 elements but has 2")]
    fn array_size_failure() {
        assert_json_array_size(&response(), 666, "/users");
    }

    #[test]
    #[should_panic(expected = "JSON path /admins/ does not exist")]
    fn is_array_failure() {
        assert_json_is_array(&response(), "/admins/");
    }

    #[test]
    fn pretty() {
        assert_eq!(
            pretty_json(r#"{"a":[1]}"#).expect("Valid JSON"),
            "{\n  \"a\": [\n    1\n  ]\n}"
        );
        assert!(pretty_json("{").is_err());
    }
}
