//! Lexical analysis module for the parser.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//!
//! Tokens are produced lazily through the [`source::TokenSource`] trait,
//! one at a time, so the parser only pulls what it needs.

pub mod lexer;
pub mod source;
pub mod tokens;

#[cfg(test)]
mod tests;
