//! Integration tests for the parsing pipeline.
//!
//! These tests drive the public API end to end: source text goes through
//! the lexer and parser, and the tree is checked through its rendering and
//! the diagnostics that come back with it.

use monkey_parser::{
    ast::{Node, Stmt},
    errors::errors::ErrorImpl,
    format_error,
    lexer::{lexer::tokenize, source::TokenVec, tokens::TokenKind},
    parse, Lexer, Parser,
};

#[test]
fn test_parse_program() {
    let source = "
        let five = 5;
        let ten = 10;

        let add = fn(x, y) {
            x + y;
        };

        let result = add(five, ten);
        if (result > 10) {
            return true;
        } else {
            return false;
        }
    ";

    let (program, errors) = parse(Lexer::new(source, Some("main.mk".to_string())));

    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(program.len(), 5);
    assert_eq!(
        program.to_string(),
        "let five = 5;\
         let ten = 10;\
         let add = fn(x, y) { (x + y); };\
         let result = add(five, ten);\
         if ((result > 10)) { return true; } else { return false; }"
    );

    let kinds: Vec<&str> = program
        .iter()
        .map(|stmt| match stmt {
            Stmt::Let(_) => "let",
            Stmt::Return(_) => "return",
            Stmt::Expression(_) => "expression",
            Stmt::Block(_) => "block",
        })
        .collect();
    assert_eq!(kinds, vec!["let", "let", "let", "let", "expression"]);
}

#[test]
fn test_parse_pre_tokenized_input() {
    let tokens = tokenize("let x = -a * b;", None);
    let (program, errors) = parse(TokenVec::new(tokens));

    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "let x = ((-a) * b);");
}

#[test]
fn test_rendered_program_parses_to_itself() {
    let source = "let max = fn(a, b) { if (a > b) { a } else { b } }; max(1 + 2 * 3, -(4 - 5)) == 7";

    let (first, errors) = parse(Lexer::new(source, None));
    assert!(errors.is_empty());

    let rendered = first.to_string();
    let (second, errors) = parse(Lexer::new(rendered.as_str(), None));
    assert!(errors.is_empty(), "rendering did not parse: {}", rendered);

    assert_eq!(second.to_string(), rendered);
}

#[test]
fn test_errors_do_not_stop_the_parse() {
    let source = "let x 5;\nlet y = (1 + 2;\nlet z = 3;\n";
    let mut parser = Parser::new(Lexer::new(source, Some("broken.mk".to_string())));

    let program = parser.parse_program();

    assert_eq!(program.len(), 1);
    assert_eq!(program.statements[0].to_string(), "let z = 3;");
    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be Assignment, got Integer instead",
            "expected closing CloseParen, got Semicolon instead",
        ]
    );
}

#[test]
fn test_error_report_points_at_source() {
    let source = "let a = 1;\n  let b 2;\n";
    let (_, errors) = parse(Lexer::new(source, Some("report.mk".to_string())));

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assignment,
            found: TokenKind::Integer,
        }
    );

    let report = format_error(&errors[0], source);
    assert_eq!(
        report,
        "Error: UnexpectedToken (expected next token to be Assignment, got Integer instead)\n\
         -> report.mk\n  \
         |\n\
         2 | let b 2;\n  \
         | ------^\n"
    );
}

#[test]
fn test_statement_token_literals() {
    let (program, errors) = parse(Lexer::new("let a = 1; return a; a;", None));

    assert!(errors.is_empty());
    let literals: Vec<&str> = program.iter().map(|stmt| stmt.token_literal()).collect();
    assert_eq!(literals, vec!["let", "return", "a"]);
}
