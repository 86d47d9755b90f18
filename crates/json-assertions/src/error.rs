//! Error types for path resolution and failed assertions.
use core::fmt;

use serde_json::Value;

use crate::types::JsonType;

/// Why a path could not be resolved against a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The path does not start with `/`.
    InvalidPath { path: String },
    /// A key is absent, an index is past the end, or a segment descends into `null`.
    NotFound { path: String, segment: String },
    /// The segment kind does not fit the node it is applied to.
    TypeMismatch {
        path: String,
        segment: String,
        expected: JsonType,
        found: JsonType,
    },
}

impl ResolutionError {
    pub(crate) fn invalid_path(path: &str) -> Self {
        ResolutionError::InvalidPath {
            path: path.to_string(),
        }
    }
    pub(crate) fn not_found(path: &str, segment: impl fmt::Display) -> Self {
        ResolutionError::NotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        }
    }
    pub(crate) fn type_mismatch(
        path: &str,
        segment: impl fmt::Display,
        expected: JsonType,
        found: JsonType,
    ) -> Self {
        ResolutionError::TypeMismatch {
            path: path.to_string(),
            segment: segment.to_string(),
            expected,
            found,
        }
    }

    /// The path that failed to resolve.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            ResolutionError::InvalidPath { path }
            | ResolutionError::NotFound { path, .. }
            | ResolutionError::TypeMismatch { path, .. } => path,
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::InvalidPath { path } => write!(
                f,
                "JSON path {path:?} is not anchored at the document root. Start the path with /"
            ),
            ResolutionError::NotFound { path, segment } => write!(
                f,
                "JSON path {path} does not exist: nothing at segment \"{segment}\""
            ),
            ResolutionError::TypeMismatch {
                path,
                segment,
                expected,
                found,
            } => write!(
                f,
                "JSON path {path} is not the type expected: segment \"{segment}\" needs {} but found {}. {} instead of {} perhaps",
                expected.with_article(),
                found.with_article(),
                capitalize(*found),
                expected,
            ),
        }
    }
}

fn capitalize(ty: JsonType) -> String {
    let name = ty.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => name,
    }
}

impl std::error::Error for ResolutionError {}

/// A failed assertion.
///
/// The `Display` output is the human part of the message handed to the reporter.
#[derive(Debug)]
pub enum AssertionError {
    Resolution(ResolutionError),
    /// The raw text handed to the tester was not valid JSON.
    Parse {
        excerpt: String,
        source: serde_json::Error,
    },
    /// The tester holds no document, because parsing it failed earlier.
    NoDocument,
    /// The expected value could not be represented as JSON.
    Serialize(serde_json::Error),
    NotEqual {
        path: String,
        actual: Value,
        expected: Value,
    },
    NotAString {
        path: String,
        actual: Value,
    },
    NoMatch {
        path: String,
        actual: Value,
        pattern: String,
    },
    InvalidPattern {
        pattern: String,
        reason: String,
    },
    /// The regex engine gave up while matching, e.g. on hitting the backtrack limit.
    PatternRuntime {
        path: String,
        pattern: String,
        reason: String,
    },
    Missing {
        path: String,
    },
    Present {
        path: String,
    },
    NotArray {
        path: String,
        found: JsonType,
    },
    SizeMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
    SizeTooSmall {
        path: String,
        minimum: usize,
        actual: usize,
    },
    ListMismatch {
        expected: Vec<Value>,
        actual: Vec<Value>,
    },
}

impl AssertionError {
    /// Path used to excerpt the document when reporting this failure.
    ///
    /// Paths that cannot be resolved at all are excerpted from the root.
    pub(crate) fn excerpt_path<'p>(&self, origin: &'p str) -> &'p str {
        match self {
            AssertionError::Resolution(ResolutionError::InvalidPath { .. }) => "",
            _ => origin,
        }
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionError::Resolution(error) => fmt::Display::fmt(error, f),
            AssertionError::Parse { excerpt, source } => {
                write!(f, "Could not parse JSON string {excerpt:?}: {source}")
            }
            AssertionError::NoDocument => f.write_str("No JSON document to inspect"),
            AssertionError::Serialize(error) => {
                write!(f, "Expected value can not be represented as JSON: {error}")
            }
            AssertionError::NotEqual {
                path,
                actual,
                expected,
            } => write!(f, "JSON value {actual} != {expected} at path {path}"),
            AssertionError::NotAString { path, actual } => write!(
                f,
                "JSON value of {actual} at path {path} is {}, not a string",
                JsonType::from(actual).with_article()
            ),
            AssertionError::NoMatch {
                path,
                actual,
                pattern,
            } => write!(
                f,
                "JSON value of {actual} at path {path} does not match /{pattern}/"
            ),
            AssertionError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern /{pattern}/: {reason}")
            }
            AssertionError::PatternRuntime {
                path,
                pattern,
                reason,
            } => write!(
                f,
                "Matching /{pattern}/ against JSON value at path {path} failed: {reason}"
            ),
            AssertionError::Missing { path } => {
                write!(f, "JSON path {path} does not exist but is expected")
            }
            AssertionError::Present { path } => {
                write!(f, "JSON path {path} exists but expected to be missing")
            }
            AssertionError::NotArray { path, found } => write!(
                f,
                "JSON at path {path} expected to be an array but is {}",
                found.with_article()
            ),
            AssertionError::SizeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "JSON array at {path} expected to have {expected} elements but has {actual}"
            ),
            AssertionError::SizeTooSmall {
                path,
                minimum,
                actual,
            } => write!(
                f,
                "JSON array at {path} expected to have at least {minimum} elements but has {actual}"
            ),
            AssertionError::ListMismatch { expected, actual } => write!(
                f,
                "List did not equal {} {}",
                Value::Array(expected.clone()),
                Value::Array(actual.clone())
            ),
        }
    }
}

impl std::error::Error for AssertionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssertionError::Resolution(error) => Some(error),
            AssertionError::Parse { source, .. } | AssertionError::Serialize(source) => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<ResolutionError> for AssertionError {
    fn from(error: ResolutionError) -> Self {
        AssertionError::Resolution(error)
    }
}

#[cfg(test)]
mod tests {
    use super::{AssertionError, ResolutionError};
    use crate::types::JsonType;
    use serde_json::json;
    use std::error::Error as _;

    #[test]
    fn type_mismatch_message() {
        let error =
            ResolutionError::type_mismatch("/users/name", "name", JsonType::Object, JsonType::Array);
        assert_eq!(
            error.to_string(),
            "JSON path /users/name is not the type expected: segment \"name\" needs an object but found an array. Array instead of object perhaps"
        );
    }

    #[test]
    fn invalid_path_is_excerpted_from_root() {
        let error = AssertionError::from(ResolutionError::invalid_path("users"));
        assert_eq!(error.excerpt_path("users"), "");
        assert!(error.source().is_some());
    }

    #[test]
    fn list_mismatch_message() {
        let error = AssertionError::ListMismatch {
            expected: vec![json!(1), json!(2)],
            actual: vec![json!(2), json!(1)],
        };
        assert_eq!(error.to_string(), "List did not equal [1,2] [2,1]");
    }
}
