//! Query tokenizer implementation.
//!
//! The tokenizer is a state machine driven one token at a time: every call
//! to [`Tokenizer::next_token`] runs states until one of them emits a token.
//! States that only decide where to go next emit nothing.

use tracing::{debug, trace};

use super::cursor::Cursor;
use super::token::is_reserved;
use super::{LexError, Token, TokenKind};

/// Which field list is being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Select,
    GroupBy,
    OrderBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    ListItem(Clause),
    AggregateOpen(Clause),
    AggregateField(Clause),
    AggregateClose(Clause),
    ListSeparator(Clause),
    AfterFields,
    From,
    Table,
    AfterTable,
    Where,
    Condition,
    LeftOperand,
    Comparator,
    RightOperand,
    Logic,
    GroupBy,
    AfterGroupBy,
    OrderBy,
    Direction,
    CheckEnd,
    Eof,
}

/// Outcome of running a single state.
enum Step<'a> {
    /// A token was produced; continue from the given state next time.
    Emit(Token<'a>, State),
    /// Nothing was produced; run the given state immediately.
    Goto(State),
}

/// A tokenizer for `select` queries.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    state: State,
    /// Unmatched `(` seen inside the condition.
    paren_depth: usize,
    /// The `EOF` or error token, once produced.
    finished: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            state: State::Start,
            paren_depth: 0,
            finished: None,
        }
    }

    /// Scans the next token.
    ///
    /// Once `EOF` or an error token has been returned, every later call
    /// returns that same token again.
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(token) = self.finished {
            return token;
        }
        loop {
            match self.step() {
                Step::Emit(token, next) => {
                    self.state = next;
                    if token.kind.is_terminal() {
                        self.finished = Some(token);
                    }
                    if let Some(reason) = token.error() {
                        debug!(%reason, fragment = token.text, "tokenizer error");
                    } else {
                        trace!(kind = ?token.kind, text = token.text, "token");
                    }
                    return token;
                }
                Step::Goto(next) => self.state = next,
            }
        }
    }

    /// Tokenizes the entire input, including the final `EOF` or error token.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind.is_terminal() {
                break;
            }
        }
        tokens
    }

    fn step(&mut self) -> Step<'a> {
        match self.state {
            State::Start => self.lex_start(),
            State::ListItem(clause) => self.lex_list_item(clause),
            State::AggregateOpen(clause) => self.lex_aggregate_open(clause),
            State::AggregateField(clause) => self.lex_aggregate_field(clause),
            State::AggregateClose(clause) => self.lex_aggregate_close(clause),
            State::ListSeparator(clause) => self.lex_list_separator(clause),
            State::AfterFields => self.lex_after_fields(),
            State::From => self.lex_from(),
            State::Table => self.lex_table(),
            State::AfterTable => self.lex_after_table(),
            State::Where => self.lex_where(),
            State::Condition => self.lex_condition(),
            State::LeftOperand => self.lex_left_operand(),
            State::Comparator => self.lex_comparator(),
            State::RightOperand => self.lex_operand(State::Logic),
            State::Logic => self.lex_logic(),
            State::GroupBy => self.lex_two_words("group", TokenKind::GroupBy, Clause::GroupBy),
            State::AfterGroupBy => self.lex_after_group_by(),
            State::OrderBy => self.lex_two_words("order", TokenKind::OrderBy, Clause::OrderBy),
            State::Direction => self.lex_direction(),
            State::CheckEnd => self.lex_check_end(),
            State::Eof => {
                self.cursor.skip_whitespace();
                self.emit(TokenKind::Eof, State::Eof)
            }
        }
    }

    /// Emits the pending text as a token of the given kind.
    fn emit(&mut self, kind: TokenKind, next: State) -> Step<'a> {
        let token = Token::new(kind, self.cursor.pending(), self.cursor.pending_span());
        self.cursor.ignore();
        Step::Emit(token, next)
    }

    /// Emits an error token covering the rest of the input.
    fn fail(&self, reason: LexError) -> Step<'a> {
        let (text, span) = self.cursor.remainder();
        Step::Emit(Token::new(TokenKind::Error(reason), text, span), State::Eof)
    }

    fn lex_start(&mut self) -> Step<'a> {
        if self.cursor.term() == "select" {
            return self.emit(TokenKind::Select, State::ListItem(Clause::Select));
        }
        self.fail(LexError::ExpectedSelect)
    }

    fn lex_list_item(&mut self, clause: Clause) -> Step<'a> {
        let term = match self.cursor.qualified_term() {
            Some(term) if !term.is_empty() && !is_reserved(term) => term,
            _ => return self.fail(LexError::InvalidField),
        };
        match TokenKind::aggregation(term) {
            Some(kind) => self.emit(kind, State::AggregateOpen(clause)),
            None => self.emit(TokenKind::Identifier, State::ListSeparator(clause)),
        }
    }

    fn lex_aggregate_open(&mut self, clause: Clause) -> Step<'a> {
        self.cursor.skip_whitespace();
        if self.cursor.accept(|c| c == '(') {
            return self.emit(TokenKind::LeftParen, State::AggregateField(clause));
        }
        self.fail(LexError::Aggregation)
    }

    fn lex_aggregate_field(&mut self, clause: Clause) -> Step<'a> {
        match self.cursor.qualified_term() {
            Some(term) if !term.is_empty() && !is_reserved(term) => {
                self.emit(TokenKind::Identifier, State::AggregateClose(clause))
            }
            _ => self.fail(LexError::Aggregation),
        }
    }

    fn lex_aggregate_close(&mut self, clause: Clause) -> Step<'a> {
        self.cursor.skip_whitespace();
        if self.cursor.accept(|c| c == ')') {
            return self.emit(TokenKind::RightParen, State::ListSeparator(clause));
        }
        self.fail(LexError::Aggregation)
    }

    fn lex_list_separator(&mut self, clause: Clause) -> Step<'a> {
        self.cursor.skip_whitespace();
        if self.cursor.accept(|c| c == ',') {
            return self.emit(TokenKind::Comma, State::ListItem(clause));
        }
        Step::Goto(match clause {
            Clause::Select => State::AfterFields,
            Clause::GroupBy => State::AfterGroupBy,
            Clause::OrderBy => State::Direction,
        })
    }

    fn lex_after_fields(&mut self) -> Step<'a> {
        Step::Goto(match self.cursor.peek_term() {
            "from" => State::From,
            "where" => State::Where,
            _ => State::CheckEnd,
        })
    }

    fn lex_from(&mut self) -> Step<'a> {
        self.cursor.term();
        self.emit(TokenKind::From, State::Table)
    }

    fn lex_table(&mut self) -> Step<'a> {
        let table = self.cursor.term();
        if table.is_empty() || is_reserved(table) {
            return self.fail(LexError::InvalidTable);
        }
        self.emit(TokenKind::Identifier, State::AfterTable)
    }

    fn lex_after_table(&mut self) -> Step<'a> {
        Step::Goto(match self.cursor.peek_term() {
            "where" => State::Where,
            "group" => State::GroupBy,
            "order" => State::OrderBy,
            _ => State::CheckEnd,
        })
    }

    fn lex_where(&mut self) -> Step<'a> {
        self.cursor.term();
        self.emit(TokenKind::Where, State::Condition)
    }

    fn lex_condition(&mut self) -> Step<'a> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('(') => {
                self.cursor.advance();
                self.paren_depth += 1;
                self.emit(TokenKind::LeftParen, State::Condition)
            }
            Some(')') => self.close_paren(State::Condition),
            _ if self.cursor.peek_term() == "not" => {
                self.cursor.term();
                self.emit(TokenKind::Not, State::Condition)
            }
            _ => Step::Goto(State::LeftOperand),
        }
    }

    fn close_paren(&mut self, next: State) -> Step<'a> {
        let Some(depth) = self.paren_depth.checked_sub(1) else {
            return self.fail(LexError::UnexpectedRightParen);
        };
        self.paren_depth = depth;
        self.cursor.advance();
        self.emit(TokenKind::RightParen, next)
    }

    /// Scans the compared field, which may not be a reserved word.
    fn lex_left_operand(&mut self) -> Step<'a> {
        if self.cursor.peek_term().is_empty() {
            return self.lex_operand(State::Comparator);
        }
        match self.cursor.qualified_term() {
            Some(term) if !is_reserved(term) => {
                self.emit(TokenKind::Identifier, State::Comparator)
            }
            _ => self.fail(LexError::InvalidOperand),
        }
    }

    /// Scans a string, number or qualified identifier.
    fn lex_operand(&mut self, next: State) -> Step<'a> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('"') => self.lex_string(next),
            Some(c) if c == '+' || c == '-' || c.is_ascii_digit() => self.lex_number(next),
            Some(c) if c.is_ascii_alphabetic() => match self.cursor.qualified_term() {
                Some(_) => self.emit(TokenKind::Identifier, next),
                None => self.fail(LexError::InvalidOperand),
            },
            _ => self.fail(LexError::InvalidOperand),
        }
    }

    /// Scans a double-quoted string verbatim; there are no escape sequences.
    fn lex_string(&mut self, next: State) -> Step<'a> {
        self.cursor.advance();
        loop {
            match self.cursor.advance() {
                Some('"') => return self.emit(TokenKind::StringLiteral, next),
                Some(_) => {}
                None => return self.fail(LexError::UnterminatedString),
            }
        }
    }

    fn lex_number(&mut self, next: State) -> Step<'a> {
        let cursor = &mut self.cursor;
        cursor.accept(|c| c == '+' || c == '-');

        let mut hex = false;
        let mut digits = 0;
        if cursor.accept(|c| c == '0') {
            if cursor.accept(|c| c == 'x' || c == 'X') {
                hex = true;
            } else {
                digits += 1;
            }
        }
        let is_digit = move |c: char| {
            if hex {
                c.is_ascii_hexdigit()
            } else {
                c.is_ascii_digit()
            }
        };

        digits += cursor.accept_run(is_digit);
        if cursor.accept(|c| c == '.') {
            digits += cursor.accept_run(is_digit);
        }
        if digits == 0 {
            return self.fail(LexError::InvalidNumber);
        }

        if cursor.accept(|c| c == 'e' || c == 'E') {
            cursor.accept(|c| c == '+' || c == '-');
            if cursor.accept_run(|c| c.is_ascii_digit()) == 0 {
                return self.fail(LexError::InvalidNumber);
            }
        }
        self.emit(TokenKind::Number, next)
    }

    fn lex_comparator(&mut self) -> Step<'a> {
        self.cursor.skip_whitespace();
        let kind = match self.cursor.advance() {
            Some('=') => TokenKind::Equal,
            Some('<') => {
                if self.cursor.accept(|c| c == '=') {
                    TokenKind::LessEqual
                } else if self.cursor.accept(|c| c == '>') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Less
                }
            }
            Some('>') => {
                if self.cursor.accept(|c| c == '=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            Some('!') if self.cursor.accept(|c| c == '=') => TokenKind::NotEqual,
            Some(c) if c.is_ascii_alphabetic() => {
                self.cursor.pos = self.cursor.start;
                if self.cursor.term() != "like" {
                    return self.fail(LexError::InvalidComparator);
                }
                TokenKind::Like
            }
            _ => return self.fail(LexError::InvalidComparator),
        };
        self.emit(kind, State::RightOperand)
    }

    fn lex_logic(&mut self) -> Step<'a> {
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(')') {
            return self.close_paren(State::Logic);
        }
        if self.cursor.is_at_end() {
            if self.paren_depth > 0 {
                return self.fail(LexError::UnclosedParen);
            }
            return Step::Goto(State::Eof);
        }
        match self.cursor.peek_term() {
            "and" => {
                self.cursor.term();
                self.emit(TokenKind::And, State::Condition)
            }
            "or" => {
                self.cursor.term();
                self.emit(TokenKind::Or, State::Condition)
            }
            "group" | "order" if self.paren_depth > 0 => self.fail(LexError::UnclosedParen),
            "group" => Step::Goto(State::GroupBy),
            "order" => Step::Goto(State::OrderBy),
            _ => self.fail(LexError::InvalidLogic),
        }
    }

    /// Scans `<first> by` as a single token and starts the clause's field list.
    fn lex_two_words(&mut self, first: &str, kind: TokenKind, clause: Clause) -> Step<'a> {
        let term = self.cursor.term();
        debug_assert_eq!(term, first);
        let begin = self.cursor.start;
        if self.cursor.term() != "by" {
            self.cursor.start = begin;
            return self.fail(LexError::ExpectedBy);
        }
        self.cursor.start = begin;
        self.emit(kind, State::ListItem(clause))
    }

    fn lex_after_group_by(&mut self) -> Step<'a> {
        if self.cursor.peek_term() == "order" {
            return Step::Goto(State::OrderBy);
        }
        Step::Goto(State::CheckEnd)
    }

    fn lex_direction(&mut self) -> Step<'a> {
        let kind = match self.cursor.peek_term() {
            "asc" => TokenKind::Asc,
            "desc" => TokenKind::Desc,
            _ => return Step::Goto(State::CheckEnd),
        };
        self.cursor.term();
        self.emit(kind, State::CheckEnd)
    }

    fn lex_check_end(&mut self) -> Step<'a> {
        self.cursor.skip_whitespace();
        if self.cursor.is_at_end() {
            return Step::Goto(State::Eof);
        }
        self.fail(LexError::TrailingInput)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    /// Yields tokens up to and including the terminal token, then `None`.
    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished.is_some() {
            return None;
        }
        Some(self.next_token())
    }
}
