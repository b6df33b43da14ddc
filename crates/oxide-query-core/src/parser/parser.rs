//! Query parser implementation.

use tracing::{debug, trace};

use super::error::SyntaxError;
use super::fold::{fold_left, token_to_aggregation, token_to_comparator, token_to_join};
use crate::ast::{Condition, FieldSpec, Literal, SelectStatement, SortDirection};
use crate::lexer::{Token, TokenKind, Tokenizer};

/// Grammar clause the parser is in.
#[derive(Debug)]
enum ParseState {
    Start,
    Field,
    FromTable,
    Condition,
    GroupBy,
    OrderBy,
    Sort,
    End,
    Error(SyntaxError),
}

/// Parser for `select` queries.
///
/// Tokens are pulled from the tokenizer one at a time, with at most one
/// token held back for lookahead.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    lookahead: Option<Token<'a>>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            lookahead: None,
        }
    }

    /// Parses the whole input as one `select` statement.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or grammatical error in the input. No
    /// partial statement is returned.
    pub fn parse(mut self) -> Result<SelectStatement, SyntaxError> {
        let mut statement = SelectStatement::default();
        let mut state = ParseState::Start;
        loop {
            trace!(?state, "parser state");
            let next = match state {
                ParseState::Start => self.parse_start(),
                ParseState::Field => self.parse_fields(&mut statement),
                ParseState::FromTable => self.parse_table(&mut statement),
                ParseState::Condition => self.parse_where(&mut statement),
                ParseState::GroupBy => self.parse_group_by(&mut statement),
                ParseState::OrderBy => self.parse_order_by(&mut statement),
                ParseState::Sort => self.parse_sort(&mut statement),
                ParseState::End => {
                    debug!(
                        table = %statement.table,
                        fields = statement.fields.len(),
                        "parsed select statement"
                    );
                    return Ok(statement);
                }
                ParseState::Error(err) => {
                    debug!(%err, "parse failed");
                    return Err(err);
                }
            };
            state = next.unwrap_or_else(ParseState::Error);
        }
    }

    fn parse_start(&mut self) -> Result<ParseState, SyntaxError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Select => Ok(ParseState::Field),
            _ => Err(SyntaxError::unexpected("SELECT", &token)),
        }
    }

    fn parse_fields(&mut self, statement: &mut SelectStatement) -> Result<ParseState, SyntaxError> {
        statement.fields = self.parse_field_list()?;
        let token = self.advance();
        match token.kind {
            TokenKind::From => Ok(ParseState::FromTable),
            _ => Err(SyntaxError::unexpected("FROM", &token)),
        }
    }

    fn parse_table(&mut self, statement: &mut SelectStatement) -> Result<ParseState, SyntaxError> {
        let token = self.advance();
        if token.kind != TokenKind::Identifier {
            return Err(SyntaxError::unexpected("table name", &token));
        }
        statement.table = String::from(token.text);

        let token = self.advance();
        match token.kind {
            TokenKind::Where => Ok(ParseState::Condition),
            TokenKind::GroupBy => Ok(ParseState::GroupBy),
            TokenKind::OrderBy => Ok(ParseState::OrderBy),
            TokenKind::Eof => Ok(ParseState::End),
            _ => Err(SyntaxError::unexpected(
                "WHERE, GROUP BY, ORDER BY or end of input",
                &token,
            )),
        }
    }

    fn parse_where(&mut self, statement: &mut SelectStatement) -> Result<ParseState, SyntaxError> {
        statement.condition = Some(self.parse_condition()?);
        let token = self.advance();
        match token.kind {
            TokenKind::GroupBy => Ok(ParseState::GroupBy),
            TokenKind::OrderBy => Ok(ParseState::OrderBy),
            TokenKind::Eof => Ok(ParseState::End),
            _ => Err(SyntaxError::unexpected(
                "AND, OR, GROUP BY, ORDER BY or end of input",
                &token,
            )),
        }
    }

    fn parse_group_by(
        &mut self,
        statement: &mut SelectStatement,
    ) -> Result<ParseState, SyntaxError> {
        statement.group_by = Some(self.parse_field_list()?);
        let token = self.advance();
        match token.kind {
            TokenKind::OrderBy => Ok(ParseState::OrderBy),
            TokenKind::Eof => Ok(ParseState::End),
            _ => Err(SyntaxError::unexpected("ORDER BY or end of input", &token)),
        }
    }

    fn parse_order_by(
        &mut self,
        statement: &mut SelectStatement,
    ) -> Result<ParseState, SyntaxError> {
        statement.order_by = Some(self.parse_field_list()?);
        Ok(ParseState::Sort)
    }

    fn parse_sort(&mut self, statement: &mut SelectStatement) -> Result<ParseState, SyntaxError> {
        let token = self.advance();
        let direction = match token.kind {
            TokenKind::Asc => SortDirection::Asc,
            TokenKind::Desc => SortDirection::Desc,
            TokenKind::Eof => return Ok(ParseState::End),
            _ => return Err(SyntaxError::unexpected("ASC, DESC or end of input", &token)),
        };
        statement.sort_direction = Some(direction);
        self.expect(TokenKind::Eof, "end of input")?;
        Ok(ParseState::End)
    }

    /// Parses a comma-separated list of bare or aggregated fields.
    fn parse_field_list(&mut self) -> Result<Vec<FieldSpec>, SyntaxError> {
        let mut fields = vec![];
        loop {
            fields.push(self.parse_field()?);
            if self.peek().kind != TokenKind::Comma {
                break;
            }
            self.advance();
        }
        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<FieldSpec, SyntaxError> {
        let token = self.advance();
        if token.kind == TokenKind::Identifier {
            return Ok(FieldSpec::bare(token.text));
        }
        let Some(kind) = token_to_aggregation(token.kind) else {
            return Err(SyntaxError::unexpected("field name", &token));
        };
        self.expect_in_aggregation(TokenKind::LeftParen)?;
        let field = self.expect_in_aggregation(TokenKind::Identifier)?;
        self.expect_in_aggregation(TokenKind::RightParen)?;
        Ok(FieldSpec::aggregated(kind, field.text))
    }

    fn expect_in_aggregation(&mut self, kind: TokenKind) -> Result<Token<'a>, SyntaxError> {
        let token = self.advance();
        if token.kind == kind {
            return Ok(token);
        }
        if token.error().is_some() {
            return Err(SyntaxError::unexpected("aggregation", &token));
        }
        Err(SyntaxError::new("aggregation error", &token))
    }

    /// Parses atoms joined by `and`/`or`, folded left to right.
    fn parse_condition(&mut self) -> Result<Condition, SyntaxError> {
        let first = self.parse_atom()?;
        let mut rest = vec![];
        while let Some(op) = token_to_join(self.peek().kind) {
            self.advance();
            rest.push((op, self.parse_atom()?));
        }
        Ok(fold_left(first, rest))
    }

    /// Parses a comparison, a parenthesized condition, or `not` and its atom.
    fn parse_atom(&mut self) -> Result<Condition, SyntaxError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Not => Ok(Condition::negate(self.parse_atom()?)),
            TokenKind::LeftParen => {
                let inner = self.parse_condition()?;
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Identifier => self.parse_comparison(token.text),
            _ => Err(SyntaxError::unexpected("condition", &token)),
        }
    }

    fn parse_comparison(&mut self, field: &str) -> Result<Condition, SyntaxError> {
        let token = self.advance();
        let Some(comparator) = token_to_comparator(token.kind) else {
            return Err(SyntaxError::unexpected("comparator", &token));
        };

        let token = self.advance();
        let value = match token.kind {
            TokenKind::StringLiteral => {
                let text = token
                    .text
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .unwrap_or(token.text);
                Literal::string(text)
            }
            TokenKind::Number => Literal::number(token.text),
            _ => return Err(SyntaxError::unexpected("string or number", &token)),
        };
        Ok(Condition::comparison(field, comparator, value))
    }

    // --- Helper methods ---

    /// Takes the next token, pulling from the tokenizer if none is held.
    fn advance(&mut self) -> Token<'a> {
        self.lookahead
            .take()
            .unwrap_or_else(|| self.tokenizer.next_token())
    }

    /// Returns the next token without consuming it.
    fn peek(&mut self) -> Token<'a> {
        *self
            .lookahead
            .get_or_insert_with(|| self.tokenizer.next_token())
    }

    /// Expects the next token to be of the given kind.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'a>, SyntaxError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(SyntaxError::unexpected(expected, &token))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AggregationKind, Comparator, LogicOp};
    use crate::lexer::LexError;

    fn parse(query: &str) -> Result<SelectStatement, SyntaxError> {
        Parser::new(query).parse()
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("select id, name from users").unwrap();
        assert_eq!(
            stmt.fields,
            vec![FieldSpec::bare("id"), FieldSpec::bare("name")]
        );
        assert_eq!(stmt.table, "users");
        assert_eq!(stmt.condition, None);
        assert_eq!(stmt.group_by, None);
        assert_eq!(stmt.order_by, None);
        assert_eq!(stmt.sort_direction, None);
    }

    #[test]
    fn test_aggregation_fields() {
        let stmt = parse("select count(x), y from t").unwrap();
        assert_eq!(
            stmt.fields,
            vec![
                FieldSpec::aggregated(AggregationKind::Count, "x"),
                FieldSpec::bare("y"),
            ]
        );
    }

    #[test]
    fn test_left_associative_folding() {
        let stmt = parse("select a from t where a = 1 and b = 2 or c = 3").unwrap();
        let cmp = |field: &str, value: &str| {
            Condition::comparison(field, Comparator::Equal, Literal::number(value))
        };
        assert_eq!(
            stmt.condition,
            Some(Condition::group(
                LogicOp::Or,
                vec![
                    Condition::group(LogicOp::And, vec![cmp("a", "1"), cmp("b", "2")]),
                    cmp("c", "3"),
                ],
            ))
        );
    }

    #[test]
    fn test_string_literal_loses_quotes() {
        let stmt = parse("select a from t where name like \"bo%\"").unwrap();
        assert_eq!(
            stmt.condition,
            Some(Condition::comparison(
                "name",
                Comparator::Like,
                Literal::string("bo%")
            ))
        );
    }

    #[test]
    fn test_missing_from() {
        let err = parse("select a where a = 1").unwrap_err();
        assert_eq!(err.message(), "expected FROM");
        assert_eq!(err.fragment(), "where");
    }

    #[test]
    fn test_identifier_on_right_hand_side() {
        let err = parse("select a from t where a = b").unwrap_err();
        assert!(!err.is_lex());
        assert_eq!(err.message(), "expected string or number");
        assert_eq!(err.fragment(), "b");
    }

    #[test]
    fn test_lexical_error_is_forwarded() {
        let err = parse("select a from t where a = \"x").unwrap_err();
        assert!(matches!(
            err,
            SyntaxError::Lex {
                reason: LexError::UnterminatedString,
                ..
            }
        ));
    }

    #[test]
    fn test_sort_without_order_is_trailing_input() {
        let err = parse("select a from t desc").unwrap_err();
        assert!(matches!(
            err,
            SyntaxError::Lex {
                reason: LexError::TrailingInput,
                ..
            }
        ));
    }
}
