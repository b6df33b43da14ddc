//! Lexical error classes carried by error tokens.

/// Why the tokenizer stopped.
///
/// An error token stores one of these in its kind and the offending
/// input fragment in its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexError {
    /// The query does not begin with `select`.
    #[error("expected SELECT")]
    ExpectedSelect,
    /// A field list entry is not a qualified identifier.
    #[error("query field not valid")]
    InvalidField,
    /// An aggregation is not of the form `name(field)`.
    #[error("aggregation error")]
    Aggregation,
    /// The table name after `from` is missing or reserved.
    #[error("table name not valid")]
    InvalidTable,
    /// A condition operand is not a string, number or identifier.
    #[error("condition operand not valid")]
    InvalidOperand,
    /// A numeric literal has no digits where digits are required.
    #[error("invalid number")]
    InvalidNumber,
    /// A quoted string has no closing quote.
    #[error("unclosed string")]
    UnterminatedString,
    /// The symbol between two operands is not a comparator.
    #[error("unknown comparator")]
    InvalidComparator,
    /// A comparison is followed by something other than a join or a clause.
    #[error("expected and, or, group by, order by or end of input")]
    InvalidLogic,
    /// `group` or `order` is not followed by `by`.
    #[error("expected BY")]
    ExpectedBy,
    /// A `)` closes more parentheses than were opened.
    #[error("unexpected right paren")]
    UnexpectedRightParen,
    /// The condition ends while parentheses are still open.
    #[error("unclosed paren")]
    UnclosedParen,
    /// Text remains after a complete statement.
    #[error("unexpected trailing input")]
    TrailingInput,
}
