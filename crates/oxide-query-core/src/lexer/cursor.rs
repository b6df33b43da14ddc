//! Code-point cursor over the query text.

use super::Span;

/// Scanning position shared by the tokenizer states.
///
/// `start` marks the beginning of the pending token and `pos` the next
/// unread character. Both are byte offsets on `char` boundaries.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pub(crate) start: usize,
    pub(crate) pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
        }
    }

    /// Returns the current character without advancing.
    pub(crate) fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes one character if it satisfies `valid`.
    pub(crate) fn accept(&mut self, valid: impl Fn(char) -> bool) -> bool {
        if self.peek().is_some_and(valid) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes characters while they satisfy `valid`, returning how many.
    pub(crate) fn accept_run(&mut self, valid: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(&valid) {
            self.advance();
            count += 1;
        }
        count
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Skips whitespace and drops it from the pending token.
    pub(crate) fn skip_whitespace(&mut self) {
        self.accept_run(char::is_whitespace);
        self.start = self.pos;
    }

    /// Scans a run of ASCII letters after any whitespace.
    pub(crate) fn term(&mut self) -> &'a str {
        self.skip_whitespace();
        self.accept_run(|c| c.is_ascii_alphabetic());
        self.pending()
    }

    /// Returns the next term without consuming it.
    pub(crate) fn peek_term(&mut self) -> &'a str {
        let (start, pos) = (self.start, self.pos);
        self.skip_whitespace();
        let begin = self.pos;
        self.accept_run(|c| c.is_ascii_alphabetic());
        let term = &self.input[begin..self.pos];
        self.start = start;
        self.pos = pos;
        term
    }

    /// Scans `letters ('.' letters)*` after any whitespace.
    ///
    /// Returns `None` when a dot is not followed by letters and an empty
    /// string when there are no letters at all.
    pub(crate) fn qualified_term(&mut self) -> Option<&'a str> {
        if self.term().is_empty() {
            return Some("");
        }
        while self.accept(|c| c == '.') {
            if self.accept_run(|c| c.is_ascii_alphabetic()) == 0 {
                return None;
            }
        }
        Some(self.pending())
    }

    /// The text of the pending token.
    pub(crate) fn pending(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    pub(crate) const fn pending_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Everything from the start of the pending token to the end of input.
    pub(crate) fn remainder(&self) -> (&'a str, Span) {
        (
            &self.input[self.start..],
            Span::new(self.start, self.input.len()),
        )
    }

    /// Marks the current position as the start of the next token.
    pub(crate) fn ignore(&mut self) {
        self.start = self.pos;
    }
}
