//! Token types for the query tokenizer.

use core::fmt;

use super::{LexError, Span};

/// Words that can never name a field or a table.
const RESERVED: [&str; 12] = [
    "select", "from", "where", "and", "or", "not", "like", "group", "order", "by", "asc", "desc",
];

/// Returns true if `term` is a reserved keyword.
#[must_use]
pub fn is_reserved(term: &str) -> bool {
    RESERVED.contains(&term)
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Scanning failed; the token text is the offending fragment.
    Error(LexError),

    // Operands
    /// Qualified identifier (e.g., users.name)
    Identifier,
    /// Numeric literal, kept in its source form (e.g., -0x1A)
    Number,
    /// Double-quoted string, quotes included
    StringLiteral,

    // Clauses
    /// select
    Select,
    /// from
    From,
    /// where
    Where,
    /// group by
    GroupBy,
    /// order by
    OrderBy,
    /// asc
    Asc,
    /// desc
    Desc,

    // Logic
    /// like
    Like,
    /// and
    And,
    /// or
    Or,
    /// not
    Not,

    // Punctuation
    /// ,
    Comma,
    /// (
    LeftParen,
    /// )
    RightParen,

    // Comparators
    /// =
    Equal,
    /// != or <>
    NotEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
    /// <
    Less,
    /// <=
    LessEqual,

    // Aggregations
    /// count
    Count,
    /// sum
    Sum,
    /// average
    Average,
    /// min
    Min,
    /// max
    Max,
    /// distinct
    Distinct,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Looks up an aggregation name (case-sensitive, lowercase only).
    #[must_use]
    pub fn aggregation(term: &str) -> Option<Self> {
        match term {
            "count" => Some(Self::Count),
            "sum" => Some(Self::Sum),
            "average" => Some(Self::Average),
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "distinct" => Some(Self::Distinct),
            _ => None,
        }
    }

    /// Returns true for keywords and aggregation names.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::GroupBy
                | Self::OrderBy
                | Self::Asc
                | Self::Desc
                | Self::Like
                | Self::And
                | Self::Or
                | Self::Not
                | Self::Count
                | Self::Sum
                | Self::Average
                | Self::Min
                | Self::Max
                | Self::Distinct
        )
    }

    /// Returns true if no token can follow this one.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Eof | Self::Error(_))
    }
}

/// A token and the slice of input it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The exact input text of the token.
    pub text: &'a str,
    /// The location in the input.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the error class if this is an error token.
    #[must_use]
    pub const fn error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Error(reason) => write!(f, "{reason}"),
            kind if kind.is_keyword() => write!(f, "<{}>", self.text),
            _ if self.text.chars().count() > 10 => {
                let head: String = self.text.chars().take(10).collect();
                write!(f, "{head:?}...")
            }
            _ => write!(f, "{:?}", self.text),
        }
    }
}
