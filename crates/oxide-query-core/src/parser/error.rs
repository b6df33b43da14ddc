//! Parser error types.

use core::fmt;

use crate::lexer::{LexError, Span, Token};

/// The reason a query could not be parsed.
///
/// Both variants keep the offending fragment of input so callers can point
/// at it; the span is available for tooling but never printed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The tokenizer rejected the input.
    #[error("{reason}, found {}", found(.fragment))]
    Lex {
        /// What the tokenizer could not scan.
        reason: LexError,
        /// The input from the failure point onwards.
        fragment: String,
        /// The location of the fragment.
        span: Span,
    },
    /// The tokens do not form a valid statement.
    #[error("{message}, found {}", found(.fragment))]
    Parse {
        /// What the parser expected.
        message: String,
        /// The text of the token that did not fit.
        fragment: String,
        /// The location of the fragment.
        span: Span,
    },
}

/// Renders a fragment for an error message.
struct Found<'a>(&'a str);

fn found(fragment: &str) -> Found<'_> {
    Found(fragment)
}

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("end of input")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

impl SyntaxError {
    /// Creates a parse error pointing at `token`.
    #[must_use]
    pub fn new(message: impl Into<String>, token: &Token<'_>) -> Self {
        Self::Parse {
            message: message.into(),
            fragment: String::from(token.text),
            span: token.span,
        }
    }

    /// Creates an "expected ..." error, or a lexical error if `token` is one.
    #[must_use]
    pub fn unexpected(expected: &str, token: &Token<'_>) -> Self {
        match token.error() {
            Some(reason) => Self::Lex {
                reason,
                fragment: String::from(token.text),
                span: token.span,
            },
            None => Self::new(format!("expected {expected}"), token),
        }
    }

    /// Returns the message without the fragment.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lex { reason, .. } => reason.to_string(),
            Self::Parse { message, .. } => message.clone(),
        }
    }

    /// Returns the offending input fragment.
    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            Self::Lex { fragment, .. } | Self::Parse { fragment, .. } => fragment,
        }
    }

    /// Returns the location of the offending fragment.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex { span, .. } | Self::Parse { span, .. } => *span,
        }
    }

    /// Returns true if the tokenizer produced this error.
    #[must_use]
    pub const fn is_lex(&self) -> bool {
        matches!(self, Self::Lex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_unexpected_token_message() {
        let token = Token::new(TokenKind::Where, "where", Span::new(9, 14));
        let err = SyntaxError::unexpected("FROM", &token);
        assert!(!err.is_lex());
        assert_eq!(err.message(), "expected FROM");
        assert_eq!(err.fragment(), "where");
        assert_eq!(err.span(), Span::new(9, 14));
        assert_eq!(err.to_string(), "expected FROM, found \"where\"");
    }

    #[test]
    fn test_error_token_becomes_lex_error() {
        let token = Token::new(
            TokenKind::Error(LexError::UnexpectedRightParen),
            "))",
            Span::new(26, 28),
        );
        let err = SyntaxError::unexpected("FROM", &token);
        assert!(err.is_lex());
        assert_eq!(err.to_string(), "unexpected right paren, found \"))\"");
    }

    #[test]
    fn test_end_of_input_fragment() {
        let token = Token::new(TokenKind::Eof, "", Span::new(8, 8));
        let err = SyntaxError::new("aggregation error", &token);
        assert_eq!(err.to_string(), "aggregation error, found end of input");
    }
}
