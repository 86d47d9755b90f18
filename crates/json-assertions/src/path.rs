use core::fmt;

/// A single segment of a path.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Segment<'a> {
    /// A string key for object properties.
    Key(&'a str),
    /// A numeric index for array elements.
    Index(usize),
}

impl<'a> Segment<'a> {
    /// Classify a raw, non-empty segment.
    ///
    /// A segment made only of ASCII digits is an index. Indices that do not fit into `usize`
    /// saturate, so they behave like any other index past the end of an array.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Segment::Index(raw.parse().unwrap_or(usize::MAX))
        } else {
            Segment::Key(raw)
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Iterator over the non-empty segments of a slash-delimited path.
///
/// Consecutive slashes and a trailing slash produce empty segments, which are skipped.
/// The iterator does not check for a leading `/`; that is up to the caller.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    #[inline]
    #[must_use]
    pub fn new(path: &'a str) -> Self {
        Segments { rest: path }
    }

    /// The part of the path that has not been consumed yet.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.rest
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let trimmed = self.rest.trim_start_matches('/');
        if trimmed.is_empty() {
            self.rest = trimmed;
            return None;
        }
        let (raw, rest) = match trimmed.find('/') {
            Some(end) => trimmed.split_at(end),
            None => (trimmed, ""),
        };
        self.rest = rest;
        Some(Segment::parse(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::{Segment, Segments};
    use test_case::test_case;

    #[test_case("", &[]; "empty")]
    #[test_case("/", &[]; "root")]
    #[test_case("/users", &[Segment::Key("users")]; "single key")]
    #[test_case("/users/", &[Segment::Key("users")]; "trailing slash")]
    #[test_case("//users//0", &[Segment::Key("users"), Segment::Index(0)]; "repeated slashes")]
    #[test_case("/users/0/name", &[Segment::Key("users"), Segment::Index(0), Segment::Key("name")]; "mixed")]
    #[test_case("/v1", &[Segment::Key("v1")]; "digits inside a key")]
    #[test_case("/-1", &[Segment::Key("-1")]; "negative is a key")]
    #[test_case("/007", &[Segment::Index(7)]; "leading zeros")]
    #[test_case("users/0", &[Segment::Key("users"), Segment::Index(0)]; "no leading slash")]
    fn segments(path: &str, expected: &[Segment<'_>]) {
        assert_eq!(Segments::new(path).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn huge_index_saturates() {
        assert_eq!(
            Segment::parse("99999999999999999999999"),
            Segment::Index(usize::MAX)
        );
    }

    #[test]
    fn remaining_path() {
        let mut segments = Segments::new("/users/0/name");
        assert_eq!(segments.next(), Some(Segment::Key("users")));
        assert_eq!(segments.as_str(), "/0/name");
        assert_eq!(segments.next(), Some(Segment::Index(0)));
        assert_eq!(segments.next(), Some(Segment::Key("name")));
        assert_eq!(segments.as_str(), "");
        assert_eq!(segments.next(), None);
    }
}
