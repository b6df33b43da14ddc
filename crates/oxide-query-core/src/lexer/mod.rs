//! Query tokenizer.
//!
//! This module provides a hand-written, pull-based tokenizer that produces
//! one token per request.

mod cursor;
mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::Span;
pub use token::{is_reserved, Token, TokenKind};
pub use tokenizer::Tokenizer;
