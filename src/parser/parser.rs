//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser keeps a
//! two-token window (current and peek) over a lazily read token source and
//! uses a Pratt approach with NUD/LED handlers for expressions.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Malformed input never aborts a parse. Each failed statement leaves one
//! diagnostic behind and parsing resumes at the next statement boundary.

use std::{collections::HashMap, mem};

use log::debug;

use crate::{
    ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        source::TokenSource,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Outcome of a single parsing function. `Err` marks the point where the
/// construct could not be parsed.
pub type ParseResult<T> = Result<T, Error>;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Where tokens are pulled from
    source: Box<dyn TokenSource>,
    /// The first token not yet consumed
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Diagnostics recorded so far, in source order
    errors: Vec<Error>,
    /// Blocks entered and not yet closed
    block_depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser reading from `source`.
    ///
    /// The lookup tables are filled and the token window is primed, so
    /// `current_token` is the first token of the input.
    pub fn new(source: impl TokenSource + 'static) -> Self {
        let mut parser = Parser {
            source: Box::new(source),
            current_token: Token::new(TokenKind::EOF, ""),
            peek_token: Token::new(TokenKind::EOF, ""),
            errors: vec![],
            block_depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser.advance();
        parser.advance();

        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Statements that fail to parse are left out of the program; their
    /// errors are available from [`Parser::errors`] afterwards.
    pub fn parse_program(&mut self) -> Program {
        let start = self.get_position();
        let mut statements = vec![];

        while !self.current_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    self.record_error(error);
                    self.synchronize();
                }
            }

            self.advance();
        }

        Program {
            statements,
            span: Span {
                start,
                end: self.get_position(),
            },
        }
    }

    /// Diagnostics recorded so far. Empty after a clean parse.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// The recorded diagnostics as plain messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Shifts the window by one token and returns the token that was current.
    pub fn advance(&mut self) -> Token {
        let next = self.source.next_token();
        let peek = mem::replace(&mut self.peek_token, next);
        mem::replace(&mut self.current_token, peek)
    }

    /// Advances only if the lookahead token is of the expected kind.
    ///
    /// # Returns
    ///
    /// Returns an UnclosedDelimiter error when a closing `)` or `}` is
    /// missing, and an UnexpectedToken error for any other mismatch.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> ParseResult<()> {
        if self.peek_is(expected_kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.peek_error(expected_kind))
        }
    }

    fn peek_error(&self, expected: TokenKind) -> Error {
        let found = self.peek_token.kind;
        let error = match expected {
            TokenKind::CloseParen | TokenKind::CloseCurly => {
                ErrorImpl::UnclosedDelimiter { expected, found }
            }
            _ => ErrorImpl::UnexpectedToken { expected, found },
        };

        Error::new(error, self.peek_token.span.start.clone())
    }

    /// Binding power of the lookahead token; `Default` for non-operators.
    pub fn peek_precedence(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.peek_token.kind)
            .unwrap_or(&BindingPower::Default)
    }

    fn record_error(&mut self, error: Error) {
        debug!("parse error at offset {}: {}", error.get_position().0, error);
        self.errors.push(error);
    }

    /// Skips to the end of the failed statement: the next `;` outside any
    /// block, or `EOF`. Blocks the error was raised in are still open, so
    /// their closing braces are skipped along with the rest.
    fn synchronize(&mut self) {
        let mut depth = self.block_depth;
        let mut skipped = 0;

        while !self.current_is(TokenKind::EOF) {
            match self.current_token.kind {
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => depth = depth.saturating_sub(1),
                _ => {}
            }

            self.advance();
            skipped += 1;
        }

        self.block_depth = 0;

        if skipped > 0 {
            debug!("skipped {} token(s) to resynchronize", skipped);
        }
    }

    pub fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub fn leave_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token.span.start.clone()
    }
}

/// Parses everything `source` yields into a program.
///
/// This is the main entry point for parsing. It creates a parser instance
/// and returns the program together with every diagnostic recorded on the
/// way. A non-empty diagnostic list means the program is incomplete.
pub fn parse(source: impl TokenSource + 'static) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    (program, parser.into_errors())
}
