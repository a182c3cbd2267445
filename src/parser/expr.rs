use crate::{
    ast::{
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr,
        },
        statements::BlockStmt,
        Expr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::{ParseResult, Parser},
    stmt::parse_stmt,
};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// On entry the current token starts the expression; on return it is the
/// expression's last token.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> ParseResult<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => {
            return Err(Error::new(
                ErrorImpl::NoPrefixParseFn { kind: token_kind },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than bp, fold it into lhs
    while !parser.peek_is(TokenKind::Semicolon) && bp < parser.peek_precedence() {
        let led_fn = match parser.get_led_lookup().get(&parser.peek_token_kind()) {
            Some(led_fn) => *led_fn,
            None => return Ok(left),
        };
        let led_bp = parser.peek_precedence();

        parser.advance();
        left = led_fn(parser, left, led_bp)?;
    }

    Ok(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> ParseResult<Expr> {
    Ok(Expr::Identifier(parse_identifier(parser)))
}

fn parse_identifier(parser: &mut Parser) -> Identifier {
    let token = parser.current_token().clone();
    Identifier {
        value: token.value.clone(),
        token,
    }
}

pub fn parse_integer_expr(parser: &mut Parser) -> ParseResult<Expr> {
    let token = parser.current_token().clone();

    match parse_integer_value(&token.value) {
        Some(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
        None => Err(Error::new(
            ErrorImpl::IntegerParseError { token: token.value },
            token.span.start,
        )),
    }
}

/// Reads decimal text, or `0x`/`0o`/`0b` prefixed hex, octal and binary.
fn parse_integer_value(text: &str) -> Option<i64> {
    let (digits, radix) = match text.get(..2) {
        Some("0x") | Some("0X") => (&text[2..], 16),
        Some("0o") | Some("0O") => (&text[2..], 8),
        Some("0b") | Some("0B") => (&text[2..], 2),
        _ => (text, 10),
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }

    i64::from_str_radix(digits, radix).ok()
}

pub fn parse_boolean_expr(parser: &mut Parser) -> ParseResult<Expr> {
    Ok(Expr::Boolean(BooleanLiteral {
        value: parser.current_is(TokenKind::True),
        token: parser.current_token().clone(),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> ParseResult<Expr> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> ParseResult<Expr> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> ParseResult<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> ParseResult<Expr> {
    // if (<condition>) { ... } else { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block(parser)?;

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> ParseResult<Expr> {
    // fn(a, b) { ... }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
    } else {
        parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(parse_identifier(parser));

        while parser.peek_is(TokenKind::Comma) {
            parser.advance();
            parser.expect_peek(TokenKind::Identifier)?;
            parameters.push(parse_identifier(parser));
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block(parser)?;

    Ok(Expr::Function(FunctionLiteral {
        token,
        parameters,
        body,
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> ParseResult<Expr> {
    let token = parser.current_token().clone();

    let mut arguments = vec![];
    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.peek_is(TokenKind::Comma) {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        function: Box::new(left),
        arguments,
    }))
}

/// Parses a `{ ... }` block. The current token must be the opening brace;
/// on return it is the closing one.
pub fn parse_block(parser: &mut Parser) -> ParseResult<BlockStmt> {
    let token = parser.advance();
    parser.enter_block();

    let mut statements = vec![];
    while !parser.current_is(TokenKind::CloseCurly) && !parser.current_is(TokenKind::EOF) {
        statements.push(parse_stmt(parser)?);
        parser.advance();
    }

    if parser.current_is(TokenKind::EOF) {
        return Err(Error::new(
            ErrorImpl::UnclosedDelimiter {
                expected: TokenKind::CloseCurly,
                found: TokenKind::EOF,
            },
            parser.get_position(),
        ));
    }

    parser.leave_block();
    Ok(BlockStmt { token, statements })
}

#[cfg(test)]
mod tests {
    use super::parse_integer_value;

    #[test]
    fn test_parse_integer_value() {
        assert_eq!(parse_integer_value("5"), Some(5));
        assert_eq!(parse_integer_value("007"), Some(7));
        assert_eq!(parse_integer_value("0x1F"), Some(31));
        assert_eq!(parse_integer_value("0o17"), Some(15));
        assert_eq!(parse_integer_value("0B101"), Some(5));
        assert_eq!(parse_integer_value("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn test_parse_integer_value_rejects_malformed() {
        assert_eq!(parse_integer_value("9223372036854775808"), None);
        assert_eq!(parse_integer_value("12ab"), None);
        assert_eq!(parse_integer_value("0x"), None);
        assert_eq!(parse_integer_value("0b102"), None);
        assert_eq!(parse_integer_value("0x-1"), None);
        assert_eq!(parse_integer_value("1_000"), None);
    }
}
