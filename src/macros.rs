//! Token-building shorthands for the lexer's pattern table.
//!
//! Fixed-text entries (operators, delimiters) all do the same thing: emit
//! their literal and step past it. `MK_DEFAULT_HANDLER!` writes that
//! handler, and `MK_TOKEN!` spells out a `Token` with its span.

/// Builds a `Token` from a kind, its text and the span it covers.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), lexer.span_of(2));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// A pattern handler for a token whose text never varies. The span and the
/// lexer's advance both come from the length of `$value`.
///
/// ```ignore
/// handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!="),
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| -> Option<Token> {
            let span = lexer.span_of($value.len());
            lexer.advance_n($value.len());
            Some(MK_TOKEN!($kind, String::from($value), span))
        }
    };
}
