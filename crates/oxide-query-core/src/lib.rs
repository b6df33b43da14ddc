//! # oxide-query-core
//!
//! Tokenizer and parser for a small `select` query language.
//!
//! This crate provides:
//! - A pull-based tokenizer that produces exactly one token per request
//! - A parser that turns the token stream into a [`SelectStatement`]
//! - A canonical rendering of statements that parses back to the same tree
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_query_core::ast::{Comparator, Condition, Literal};
//!
//! let stmt = oxide_query_core::parse("select id, count(x) from users where age > 18").unwrap();
//! assert_eq!(stmt.table, "users");
//! assert_eq!(stmt.bare_fields().collect::<Vec<_>>(), vec!["id"]);
//! assert_eq!(
//!     stmt.condition,
//!     Some(Condition::comparison("age", Comparator::Greater, Literal::number("18")))
//! );
//! ```
//!
//! ## Errors
//!
//! Errors name what went wrong and where:
//!
//! ```rust
//! let err = oxide_query_core::parse("select name, from t").unwrap_err();
//! assert_eq!(err.to_string(), "query field not valid, found \"from t\"");
//! ```
//!
//! ## Tokens
//!
//! ```rust
//! use oxide_query_core::{TokenKind, Tokenizer};
//!
//! let kinds: Vec<_> = Tokenizer::new("select a from t").map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Select,
//!         TokenKind::Identifier,
//!         TokenKind::From,
//!         TokenKind::Identifier,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Condition, FieldSpec, SelectStatement};
pub use lexer::{LexError, Span, Token, TokenKind, Tokenizer};
pub use parser::{Parser, SyntaxError};

/// Parses one `select` statement.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the input is not a valid query.
pub fn parse(input: &str) -> Result<SelectStatement, SyntaxError> {
    Parser::new(input).parse()
}
