use crate::{
    reporter::Reporter,
    tester::{IntoDocument, JsonTester},
};

const DEFAULT_PARSE_EXCERPT_LEN: usize = 100;

/// Configuration for building a [`JsonTester`].
///
/// ```rust
/// use json_assertions::{PatternOptions, RecordingReporter};
/// use serde_json::json;
///
/// let reporter = RecordingReporter::new();
/// let document = json!({"name": "Bob"});
/// let tester = json_assertions::options()
///     .with_pattern_options(PatternOptions::regex())
///     .with_excerpts(false)
///     .build(&document, &reporter);
/// assert!(tester.matches("^B", "/name").is_pass());
/// ```
#[derive(Debug, Clone)]
pub struct AssertionOptions {
    pub(crate) pattern_options: PatternOptions,
    pub(crate) parse_excerpt_len: usize,
    pub(crate) excerpts: bool,
}

impl Default for AssertionOptions {
    fn default() -> Self {
        AssertionOptions {
            pattern_options: PatternOptions::default(),
            parse_excerpt_len: DEFAULT_PARSE_EXCERPT_LEN,
            excerpts: true,
        }
    }
}

impl AssertionOptions {
    /// Select the regex engine used by [`JsonTester::matches`].
    #[must_use]
    pub fn with_pattern_options(mut self, options: PatternOptions) -> Self {
        self.pattern_options = options;
        self
    }
    /// Number of characters of malformed input quoted in parse failures.
    #[must_use]
    pub fn with_parse_excerpt_len(mut self, len: usize) -> Self {
        self.parse_excerpt_len = len;
        self
    }
    /// Whether failure messages carry an excerpt of the document.
    #[must_use]
    pub fn with_excerpts(mut self, excerpts: bool) -> Self {
        self.excerpts = excerpts;
        self
    }
    /// Build a tester over `document` that reports to `reporter`.
    ///
    /// Text input that is not valid JSON is reported as a failure right away.
    pub fn build<'a, R: Reporter + ?Sized>(
        &self,
        document: impl IntoDocument<'a>,
        reporter: &'a R,
    ) -> JsonTester<'a, R> {
        JsonTester::with_options(document, reporter, self.clone())
    }
}

/// Regex engine used for pattern assertions, with its resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOptions {
    /// `fancy-regex`: supports lookaround and backreferences.
    FancyRegex {
        backtrack_limit: Option<usize>,
        size_limit: Option<usize>,
        dfa_size_limit: Option<usize>,
    },
    /// `regex`: linear-time matching without lookaround.
    Regex {
        size_limit: Option<usize>,
        dfa_size_limit: Option<usize>,
    },
}

impl Default for PatternOptions {
    fn default() -> Self {
        PatternOptions::fancy_regex()
    }
}

impl PatternOptions {
    /// Use `fancy-regex`, which supports lookaround and backreferences. This is the default.
    #[must_use]
    pub fn fancy_regex() -> Self {
        PatternOptions::FancyRegex {
            backtrack_limit: None,
            size_limit: None,
            dfa_size_limit: None,
        }
    }
    /// Use the `regex` crate. Matching runs in linear time, without lookaround.
    #[must_use]
    pub fn regex() -> Self {
        PatternOptions::Regex {
            size_limit: None,
            dfa_size_limit: None,
        }
    }
    /// Maximum number of backtracking steps. Ignored by the `regex` engine.
    #[must_use]
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        if let PatternOptions::FancyRegex {
            backtrack_limit, ..
        } = &mut self
        {
            *backtrack_limit = Some(limit);
        }
        self
    }
    /// Approximate size limit of a compiled pattern, in bytes.
    #[must_use]
    pub fn size_limit(mut self, limit: usize) -> Self {
        match &mut self {
            PatternOptions::FancyRegex { size_limit, .. }
            | PatternOptions::Regex { size_limit, .. } => *size_limit = Some(limit),
        }
        self
    }
    /// Size limit of the lazy DFA cache, in bytes.
    #[must_use]
    pub fn dfa_size_limit(mut self, limit: usize) -> Self {
        match &mut self {
            PatternOptions::FancyRegex { dfa_size_limit, .. }
            | PatternOptions::Regex { dfa_size_limit, .. } => *dfa_size_limit = Some(limit),
        }
        self
    }
}
