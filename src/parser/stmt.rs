use log::trace;

use crate::{
    ast::{
        expressions::Identifier,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
        Stmt,
    },
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_block, parse_expr},
        lookups::BindingPower,
    },
};

use super::parser::{ParseResult, Parser};

/// Parses the statement starting at the current token. On return the
/// current token is the statement's last token (its `;` when present).
pub fn parse_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let kind = parser.current_token_kind();
    trace!("parsing statement at {} ({:?})", kind, parser.current_token().value);

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&kind).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    // let <name> = <value>;
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name_token = parser.current_token().clone();
    let name = Identifier {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let token = parser.current_token().clone();

    let value = match parser.peek_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => None,
        _ => {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        }
    };

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> ParseResult<Stmt> {
    let block = parse_block(parser)?;

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Ok(Stmt::Block(block))
}
