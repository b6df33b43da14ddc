//! Query parser.
//!
//! A hand-written, state-driven parser that pulls tokens from the
//! tokenizer and folds `where` conditions left to right.

mod error;
mod fold;
#[allow(clippy::module_inception)]
mod parser;

pub use error::SyntaxError;
pub use parser::Parser;
