#![allow(dead_code)]

use oxide_query_core::ast::SelectStatement;
use oxide_query_core::{SyntaxError, Token, TokenKind, Tokenizer};

pub fn parse(query: &str) -> SelectStatement {
    oxide_query_core::parse(query)
        .unwrap_or_else(|e| panic!("Failed to parse: {query}\nError: {e:?}"))
}

pub fn parse_err(query: &str) -> SyntaxError {
    oxide_query_core::parse(query).expect_err(&format!("Expected syntax error for: {query}"))
}

pub fn tokens(query: &str) -> Vec<Token<'_>> {
    Tokenizer::new(query).tokenize()
}

pub fn kinds(query: &str) -> Vec<TokenKind> {
    tokens(query).into_iter().map(|t| t.kind).collect()
}

/// Verifies that rendering a parsed statement yields a query that parses
/// to the same tree and renders to the same text.
pub fn round_trip(query: &str) {
    let ast1 = parse(query);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {query}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {query}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
