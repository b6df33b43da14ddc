//! Byte ranges of tokens and error fragments within a query.

use core::fmt;

/// A byte range in the query text.
///
/// Offsets always fall on `char` boundaries, since the tokenizer only
/// stops between code points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// First byte (inclusive).
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes; zero if `end` precedes `start`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the text this span covers, or `None` if it does not fit
    /// `input`.
    #[must_use]
    pub fn slice<'a>(&self, input: &'a str) -> Option<&'a str> {
        input.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        assert_eq!(Span::new(7, 13).len(), 6);
        assert!(Span::new(4, 4).is_empty());
        assert!(!Span::new(4, 5).is_empty());
    }

    #[test]
    fn test_inverted_span_has_no_length() {
        assert_eq!(Span::new(9, 4).len(), 0);
        assert_eq!(Span::new(9, 4).slice("select a from t"), None);
    }

    #[test]
    fn test_slice() {
        let query = "select héllo from t";
        assert_eq!(Span::new(7, 13).slice(query), Some("héllo"));
        assert_eq!(Span::new(19, 19).slice(query), Some(""));
        assert_eq!(Span::new(8, 9).slice(query), None);
        assert_eq!(Span::new(10, 40).slice(query), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Span::new(3, 9).to_string(), "3..9");
    }
}
