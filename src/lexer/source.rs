//! The pull interface the parser reads tokens through.

use std::{collections::VecDeque, rc::Rc};

use crate::{Position, Span};

use super::tokens::{Token, TokenKind};

/// Anything that can hand out tokens one at a time.
///
/// Once the underlying input is exhausted an implementation must keep
/// returning `EOF` tokens, so lookahead never runs off the end.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// A token source over an already tokenized input.
///
/// If the tokens do not end in `EOF`, one is synthesised after the last
/// token, positioned where that token ended.
#[derive(Debug, Clone)]
pub struct TokenVec {
    tokens: VecDeque<Token>,
    eof: Token,
}

impl TokenVec {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = match tokens.last() {
            Some(last) => last.span.end.clone(),
            None => Position(0, Rc::new(String::from("shell"))),
        };

        TokenVec {
            tokens: tokens.into(),
            eof: Token {
                kind: TokenKind::EOF,
                value: String::new(),
                span: Span {
                    start: end.clone(),
                    end,
                },
            },
        }
    }
}

impl From<Vec<Token>> for TokenVec {
    fn from(tokens: Vec<Token>) -> Self {
        TokenVec::new(tokens)
    }
}

impl TokenSource for TokenVec {
    fn next_token(&mut self) -> Token {
        match self.tokens.pop_front() {
            Some(token) => {
                if token.kind == TokenKind::EOF {
                    self.eof = token.clone();
                    self.tokens.clear();
                }
                token
            }
            None => self.eof.clone(),
        }
    }
}
