//! Assertions over a single JSON document.
use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::{
    cmp,
    error::{AssertionError, ResolutionError},
    excerpt::excerpt,
    finite,
    options::{AssertionOptions, PatternOptions},
    regex::CompiledPattern,
    reporter::{Outcome, Reporter},
    resolver::{resolve, resolve_relative},
    types::JsonType,
};

/// Input that a [`JsonTester`] can be built from.
///
/// Structured values are used as they are; text is parsed with `serde_json`.
pub trait IntoDocument<'a> {
    /// Convert into a document, quoting at most `excerpt_len` characters of malformed text.
    ///
    /// # Errors
    ///
    /// [`AssertionError::Parse`] if the input is text that is not valid JSON.
    fn into_document(self, excerpt_len: usize) -> Result<Cow<'a, Value>, AssertionError>;
}

impl<'a> IntoDocument<'a> for Value {
    fn into_document(self, _: usize) -> Result<Cow<'a, Value>, AssertionError> {
        Ok(Cow::Owned(self))
    }
}

impl<'a> IntoDocument<'a> for &'a Value {
    fn into_document(self, _: usize) -> Result<Cow<'a, Value>, AssertionError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'a> IntoDocument<'a> for &str {
    fn into_document(self, excerpt_len: usize) -> Result<Cow<'a, Value>, AssertionError> {
        serde_json::from_str(self)
            .map(Cow::Owned)
            .map_err(|source| AssertionError::Parse {
                excerpt: self.chars().take(excerpt_len).collect(),
                source,
            })
    }
}

impl<'a> IntoDocument<'a> for String {
    fn into_document(self, excerpt_len: usize) -> Result<Cow<'a, Value>, AssertionError> {
        self.as_str().into_document(excerpt_len)
    }
}

/// Path-addressed assertions over one JSON document.
///
/// Each assertion resolves its path, reports the result to the reporter and returns it as an
/// [`Outcome`]. Failures carry a pretty-printed excerpt of the document around the path.
///
/// ```rust
/// use json_assertions::{JsonTester, RecordingReporter};
/// use serde_json::json;
///
/// let reporter = RecordingReporter::new();
/// let document = json!({"users": [{"id": 1, "name": "Bob"}, {"id": 2, "name": "Sally"}]});
/// let tester = JsonTester::new(&document, &reporter);
///
/// assert!(tester.equal("Bob", "/users/0/name").is_pass());
/// assert!(tester.array_size_is(2, "/users").is_pass());
/// assert!(tester.must_not_have("/users/0/password").is_pass());
/// assert!(tester.equal("XXX", "/users/0/name").is_fail());
/// assert_eq!(reporter.passed(), 3);
/// ```
#[derive(Debug)]
pub struct JsonTester<'a, R: Reporter + ?Sized> {
    document: Option<Cow<'a, Value>>,
    reporter: &'a R,
    options: AssertionOptions,
}

impl<'a, R: Reporter + ?Sized> JsonTester<'a, R> {
    /// Create a tester with default options.
    ///
    /// Text input that is not valid JSON is reported as a failure right away, and every later
    /// assertion on this tester fails as well.
    pub fn new(document: impl IntoDocument<'a>, reporter: &'a R) -> Self {
        Self::with_options(document, reporter, AssertionOptions::default())
    }

    pub(crate) fn with_options(
        document: impl IntoDocument<'a>,
        reporter: &'a R,
        options: AssertionOptions,
    ) -> Self {
        let mut tester = JsonTester {
            document: None,
            reporter,
            options,
        };
        match document.into_document(tester.options.parse_excerpt_len) {
            Ok(document) => tester.document = Some(document),
            Err(error) => {
                tester.fail(&error, "", None);
            }
        }
        tester
    }

    /// The document under test, if it could be parsed.
    #[must_use]
    pub fn document(&self) -> Option<&Value> {
        self.document.as_deref()
    }

    /// Look up a top-level key without reporting anything.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document()?.get(key)
    }

    /// Return a view whose assertions use `message` instead of the default description when
    /// they fail.
    ///
    /// The message applies to every assertion made through the view. The excerpt of the
    /// document is still appended.
    ///
    /// ```rust
    /// use json_assertions::{JsonTester, RecordingReporter};
    /// use serde_json::json;
    ///
    /// let reporter = RecordingReporter::new();
    /// let tester = JsonTester::new(json!({"name": "Bob"}), &reporter);
    /// let outcome = tester.with_message("wrong user").equal("Sally", "/name");
    /// assert!(outcome.message().is_some_and(|m| m.starts_with("wrong user\n")));
    /// ```
    #[must_use]
    pub fn with_message<'t>(&'t self, message: &'t str) -> WithMessage<'t, 'a, R> {
        WithMessage {
            tester: self,
            message,
        }
    }

    /// Assert that the value at `path` deep-equals `expected`.
    ///
    /// Numbers compare by value, so `1` equals `1.0`. An expected value that has no JSON
    /// representation, such as `f64::NAN`, always fails.
    pub fn equal(&self, expected: impl Serialize, path: &str) -> Outcome {
        self.equal_with(None, &expected, path)
    }

    /// Alias for [`JsonTester::equal`].
    pub fn equals(&self, expected: impl Serialize, path: &str) -> Outcome {
        self.equal_with(None, &expected, path)
    }

    /// Assert that the value at `path` is a string containing a match for `pattern`.
    pub fn matches(&self, pattern: &str, path: &str) -> Outcome {
        self.matches_with(None, pattern, path)
    }

    /// Assert that `path` resolves to a value other than `null`.
    pub fn must_have(&self, path: &str) -> Outcome {
        self.must_have_with(None, path)
    }

    /// Assert that `path` does not resolve, or resolves to `null`.
    pub fn must_not_have(&self, path: &str) -> Outcome {
        self.must_not_have_with(None, path)
    }

    /// Assert that the value at `path` is an array.
    pub fn is_array(&self, path: &str) -> Outcome {
        self.is_array_with(None, path)
    }

    /// Assert that `path` is an array of exactly `expected` elements.
    pub fn array_size_is(&self, expected: usize, path: &str) -> Outcome {
        self.array_size_is_with(None, expected, path)
    }

    /// Alias for [`JsonTester::array_size_is`].
    pub fn array_length_is(&self, expected: usize, path: &str) -> Outcome {
        self.array_size_is_with(None, expected, path)
    }

    /// Assert that `path` is an array of at least `minimum` elements.
    pub fn array_size_gte(&self, minimum: usize, path: &str) -> Outcome {
        self.array_size_gte_with(None, minimum, path)
    }

    /// Assert that mapping `value_path` over the array at `list_path` yields `expected`, in order.
    ///
    /// `value_path` is resolved relative to each element, so `"id"` and `"/id"` are the same
    /// path. Elements where it does not exist contribute `null`.
    pub fn array_map_equals<T: Into<Value>>(
        &self,
        expected: impl IntoIterator<Item = T>,
        list_path: &str,
        value_path: &str,
    ) -> Outcome {
        self.array_map_equals_with(None, expected, list_path, value_path)
    }

    /// Return the value at `path`.
    ///
    /// Nothing is reported on success. If the path does not resolve, a failure is reported and
    /// `None` is returned.
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        self.value_at_with(None, path)
    }

    fn equal_with(&self, message: Option<&str>, expected: &impl Serialize, path: &str) -> Outcome {
        self.check(path, message, |document| check_equal(document, expected, path))
    }

    fn matches_with(&self, message: Option<&str>, pattern: &str, path: &str) -> Outcome {
        self.check(path, message, |document| {
            check_matches(document, pattern, &self.options.pattern_options, path)
        })
    }

    fn must_have_with(&self, message: Option<&str>, path: &str) -> Outcome {
        self.check(path, message, |document| check_has(document, path))
    }

    fn must_not_have_with(&self, message: Option<&str>, path: &str) -> Outcome {
        self.check(path, message, |document| check_missing(document, path))
    }

    fn is_array_with(&self, message: Option<&str>, path: &str) -> Outcome {
        self.check(path, message, |document| array_at(document, path).map(|_| ()))
    }

    fn array_size_is_with(&self, message: Option<&str>, expected: usize, path: &str) -> Outcome {
        self.check(path, message, |document| check_size_is(document, expected, path))
    }

    fn array_size_gte_with(&self, message: Option<&str>, minimum: usize, path: &str) -> Outcome {
        self.check(path, message, |document| {
            check_size_gte(document, minimum, path)
        })
    }

    fn array_map_equals_with<T: Into<Value>>(
        &self,
        message: Option<&str>,
        expected: impl IntoIterator<Item = T>,
        list_path: &str,
        value_path: &str,
    ) -> Outcome {
        let expected = expected.into_iter().map(Into::into).collect::<Vec<_>>();
        self.check(list_path, message, |document| {
            check_map_equals(document, expected, list_path, value_path)
        })
    }

    fn value_at_with(&self, message: Option<&str>, path: &str) -> Option<&Value> {
        let result = match self.document() {
            Some(document) => resolve(document, path).map_err(AssertionError::from),
            None => Err(AssertionError::NoDocument),
        };
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.fail(&error, path, message);
                None
            }
        }
    }

    fn check(
        &self,
        path: &str,
        message: Option<&str>,
        assertion: impl FnOnce(&Value) -> Result<(), AssertionError>,
    ) -> Outcome {
        let result = match self.document() {
            Some(document) => assertion(document),
            None => Err(AssertionError::NoDocument),
        };
        match result {
            Ok(()) => {
                self.reporter.report(true, String::new());
                Outcome::Pass
            }
            Err(error) => self.fail(&error, path, message),
        }
    }

    fn fail(&self, error: &AssertionError, path: &str, message: Option<&str>) -> Outcome {
        let mut text = message.map_or_else(|| error.to_string(), str::to_string);
        if self.options.excerpts {
            if let Some(document) = self.document() {
                let shortened = excerpt(document, error.excerpt_path(path));
                if let Ok(pretty) = serde_json::to_string_pretty(&shortened) {
                    text.push('\n');
                    text.push_str(&pretty);
                }
            }
        }
        tracing::debug!(path, error = %error, "JSON assertion failed");
        self.reporter.report(false, text.clone());
        Outcome::Fail(text)
    }
}

/// A [`JsonTester`] view whose failures use a custom message.
///
/// Created by [`JsonTester::with_message`]. Each method behaves like its [`JsonTester`]
/// counterpart, except that a failure starts with the custom message.
#[derive(Debug)]
pub struct WithMessage<'t, 'a, R: Reporter + ?Sized> {
    tester: &'t JsonTester<'a, R>,
    message: &'t str,
}

impl<R: Reporter + ?Sized> WithMessage<'_, '_, R> {
    /// See [`JsonTester::equal`].
    pub fn equal(&self, expected: impl Serialize, path: &str) -> Outcome {
        self.tester.equal_with(Some(self.message), &expected, path)
    }

    /// Alias for [`WithMessage::equal`].
    pub fn equals(&self, expected: impl Serialize, path: &str) -> Outcome {
        self.tester.equal_with(Some(self.message), &expected, path)
    }

    /// See [`JsonTester::matches`].
    pub fn matches(&self, pattern: &str, path: &str) -> Outcome {
        self.tester.matches_with(Some(self.message), pattern, path)
    }

    /// See [`JsonTester::must_have`].
    pub fn must_have(&self, path: &str) -> Outcome {
        self.tester.must_have_with(Some(self.message), path)
    }

    /// See [`JsonTester::must_not_have`].
    pub fn must_not_have(&self, path: &str) -> Outcome {
        self.tester.must_not_have_with(Some(self.message), path)
    }

    /// See [`JsonTester::is_array`].
    pub fn is_array(&self, path: &str) -> Outcome {
        self.tester.is_array_with(Some(self.message), path)
    }

    /// See [`JsonTester::array_size_is`].
    pub fn array_size_is(&self, expected: usize, path: &str) -> Outcome {
        self.tester.array_size_is_with(Some(self.message), expected, path)
    }

    /// Alias for [`WithMessage::array_size_is`].
    pub fn array_length_is(&self, expected: usize, path: &str) -> Outcome {
        self.tester.array_size_is_with(Some(self.message), expected, path)
    }

    /// See [`JsonTester::array_size_gte`].
    pub fn array_size_gte(&self, minimum: usize, path: &str) -> Outcome {
        self.tester.array_size_gte_with(Some(self.message), minimum, path)
    }

    /// See [`JsonTester::array_map_equals`].
    pub fn array_map_equals<T: Into<Value>>(
        &self,
        expected: impl IntoIterator<Item = T>,
        list_path: &str,
        value_path: &str,
    ) -> Outcome {
        self.tester
            .array_map_equals_with(Some(self.message), expected, list_path, value_path)
    }

    /// See [`JsonTester::value_at`].
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        self.tester.value_at_with(Some(self.message), path)
    }
}

fn check_equal(
    document: &Value,
    expected: &impl Serialize,
    path: &str,
) -> Result<(), AssertionError> {
    let expected = finite::to_value(expected).map_err(AssertionError::Serialize)?;
    let actual = resolve(document, path)?;
    if cmp::equal(actual, &expected) {
        Ok(())
    } else {
        Err(AssertionError::NotEqual {
            path: path.to_string(),
            actual: actual.clone(),
            expected,
        })
    }
}

fn check_matches(
    document: &Value,
    pattern: &str,
    options: &PatternOptions,
    path: &str,
) -> Result<(), AssertionError> {
    let actual = resolve(document, path)?;
    let Value::String(text) = actual else {
        return Err(AssertionError::NotAString {
            path: path.to_string(),
            actual: actual.clone(),
        });
    };
    let compiled = CompiledPattern::compile(pattern, options)?;
    match compiled.search(text) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AssertionError::NoMatch {
            path: path.to_string(),
            actual: actual.clone(),
            pattern: compiled.as_str().to_string(),
        }),
        Err(reason) => Err(AssertionError::PatternRuntime {
            path: path.to_string(),
            pattern: compiled.as_str().to_string(),
            reason,
        }),
    }
}

fn check_has(document: &Value, path: &str) -> Result<(), AssertionError> {
    match resolve(document, path) {
        Ok(Value::Null)
        | Err(ResolutionError::NotFound { .. } | ResolutionError::TypeMismatch { .. }) => {
            Err(AssertionError::Missing {
                path: path.to_string(),
            })
        }
        Ok(_) => Ok(()),
        Err(error) => Err(error.into()),
    }
}

fn check_missing(document: &Value, path: &str) -> Result<(), AssertionError> {
    match resolve(document, path) {
        Ok(Value::Null)
        | Err(ResolutionError::NotFound { .. } | ResolutionError::TypeMismatch { .. }) => Ok(()),
        Ok(_) => Err(AssertionError::Present {
            path: path.to_string(),
        }),
        Err(error) => Err(error.into()),
    }
}

fn array_at<'v>(document: &'v Value, path: &str) -> Result<&'v Vec<Value>, AssertionError> {
    let value = resolve(document, path)?;
    value.as_array().ok_or_else(|| AssertionError::NotArray {
        path: path.to_string(),
        found: JsonType::from(value),
    })
}

fn check_size_is(document: &Value, expected: usize, path: &str) -> Result<(), AssertionError> {
    let items = array_at(document, path)?;
    if items.len() == expected {
        Ok(())
    } else {
        Err(AssertionError::SizeMismatch {
            path: path.to_string(),
            expected,
            actual: items.len(),
        })
    }
}

fn check_size_gte(document: &Value, minimum: usize, path: &str) -> Result<(), AssertionError> {
    let items = array_at(document, path)?;
    if items.len() >= minimum {
        Ok(())
    } else {
        Err(AssertionError::SizeTooSmall {
            path: path.to_string(),
            minimum,
            actual: items.len(),
        })
    }
}

fn check_map_equals(
    document: &Value,
    expected: Vec<Value>,
    list_path: &str,
    value_path: &str,
) -> Result<(), AssertionError> {
    let actual = array_at(document, list_path)?
        .iter()
        .map(|item| match resolve_relative(item, value_path) {
            Ok(value) => Ok(value.clone()),
            Err(ResolutionError::NotFound { .. }) => Ok(Value::Null),
            Err(error) => Err(AssertionError::from(error)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if cmp::equal_arrays(&actual, &expected) {
        Ok(())
    } else {
        Err(AssertionError::ListMismatch { expected, actual })
    }
}
