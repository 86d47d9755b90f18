use core::fmt;

use crate::{error::AssertionError, options::PatternOptions};

/// Common interface of the regex engines a pattern can be compiled with.
pub(crate) trait RegexEngine: Sized {
    type Error: fmt::Display;
    fn is_match(&self, text: &str) -> Result<bool, Self::Error>;

    fn pattern(&self) -> &str;
}

impl RegexEngine for fancy_regex::Regex {
    type Error = fancy_regex::Error;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        fancy_regex::Regex::is_match(self, text)
    }

    fn pattern(&self) -> &str {
        self.as_str()
    }
}

impl RegexEngine for regex::Regex {
    type Error = regex::Error;

    fn is_match(&self, text: &str) -> Result<bool, Self::Error> {
        Ok(regex::Regex::is_match(self, text))
    }

    fn pattern(&self) -> &str {
        self.as_str()
    }
}

/// A pattern compiled with the engine selected in [`PatternOptions`].
#[derive(Debug)]
pub(crate) enum CompiledPattern {
    Fancy(fancy_regex::Regex),
    Standard(regex::Regex),
}

impl CompiledPattern {
    pub(crate) fn compile(
        pattern: &str,
        options: &PatternOptions,
    ) -> Result<CompiledPattern, AssertionError> {
        let invalid = |reason: String| AssertionError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };
        match *options {
            PatternOptions::FancyRegex {
                backtrack_limit,
                size_limit,
                dfa_size_limit,
            } => {
                let mut builder = fancy_regex::RegexBuilder::new(pattern);
                if let Some(limit) = backtrack_limit {
                    builder.backtrack_limit(limit);
                }
                if let Some(limit) = size_limit {
                    builder.delegate_size_limit(limit);
                }
                if let Some(limit) = dfa_size_limit {
                    builder.delegate_dfa_size_limit(limit);
                }
                builder
                    .build()
                    .map(CompiledPattern::Fancy)
                    .map_err(|error| invalid(error.to_string()))
            }
            PatternOptions::Regex {
                size_limit,
                dfa_size_limit,
            } => {
                let mut builder = regex::RegexBuilder::new(pattern);
                if let Some(limit) = size_limit {
                    builder.size_limit(limit);
                }
                if let Some(limit) = dfa_size_limit {
                    builder.dfa_size_limit(limit);
                }
                builder
                    .build()
                    .map(CompiledPattern::Standard)
                    .map_err(|error| invalid(error.to_string()))
            }
        }
    }

    /// Search `text` for the pattern. The match is not anchored.
    pub(crate) fn search(&self, text: &str) -> Result<bool, String> {
        match self {
            CompiledPattern::Fancy(regex) => search_with(regex, text),
            CompiledPattern::Standard(regex) => search_with(regex, text),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            CompiledPattern::Fancy(regex) => RegexEngine::pattern(regex),
            CompiledPattern::Standard(regex) => RegexEngine::pattern(regex),
        }
    }
}

fn search_with<R: RegexEngine>(regex: &R, text: &str) -> Result<bool, String> {
    regex.is_match(text).map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::CompiledPattern;
    use crate::{error::AssertionError, options::PatternOptions};
    use test_case::test_case;

    #[test_case(PatternOptions::fancy_regex(); "fancy-regex")]
    #[test_case(PatternOptions::regex(); "regex")]
    fn searches_without_anchoring(options: PatternOptions) {
        let pattern = CompiledPattern::compile("o", &options).expect("Valid pattern");
        assert_eq!(pattern.search("Bob"), Ok(true));
        assert_eq!(pattern.search("Sally"), Ok(false));
        assert_eq!(pattern.as_str(), "o");
    }

    #[test_case(PatternOptions::fancy_regex(); "fancy-regex")]
    #[test_case(PatternOptions::regex(); "regex")]
    fn invalid_pattern(options: PatternOptions) {
        let error = CompiledPattern::compile("(unclosed", &options).expect_err("Invalid pattern");
        assert!(matches!(error, AssertionError::InvalidPattern { .. }));
    }

    #[test]
    fn lookaround_needs_fancy_regex() {
        let options = PatternOptions::fancy_regex();
        let pattern = CompiledPattern::compile("B(?=ob)", &options).expect("Valid pattern");
        assert_eq!(pattern.search("Bob"), Ok(true));
        assert!(CompiledPattern::compile("B(?=ob)", &PatternOptions::regex()).is_err());
    }

    #[test]
    fn backtrack_limit() {
        let options = PatternOptions::fancy_regex().backtrack_limit(1);
        let pattern = CompiledPattern::compile(r"(a+)+(?=b)\1", &options).expect("Valid pattern");
        assert!(pattern.search("aaaaaaaaaaaaaaaaaaaaaaaaaaaaac").is_err());
    }
}
