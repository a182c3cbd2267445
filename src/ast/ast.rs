use std::fmt::{self, Display};

use crate::Span;

use super::{
    expressions::{
        BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr, IntegerLiteral,
        PrefixExpr,
    },
    statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Shared by every node in the tree. `Display` renders the node back to
/// source text, with every prefix and infix operation parenthesised.
pub trait Node: Display {
    /// The literal text of the token the node was built from.
    fn token_literal(&self) -> &str;
    /// Returns the span of the node.
    fn get_span(&self) -> &Span;
}

/// Implements [`Node`] for payloads that keep the token they started at.
macro_rules! impl_node {
    ($($node:ty),* $(,)?) => {
        $(
            impl Node for $node {
                fn token_literal(&self) -> &str {
                    &self.token.value
                }
                fn get_span(&self) -> &Span {
                    &self.token.span
                }
            }
        )*
    };
}

impl_node!(
    LetStmt,
    ReturnStmt,
    ExpressionStmt,
    BlockStmt,
    Identifier,
    IntegerLiteral,
    BooleanLiteral,
    PrefixExpr,
    InfixExpr,
    IfExpr,
    FunctionLiteral,
    CallExpr,
);

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Stmt {
    fn as_node(&self) -> &dyn Node {
        match self {
            Stmt::Let(stmt) => stmt,
            Stmt::Return(stmt) => stmt,
            Stmt::Expression(stmt) => stmt,
            Stmt::Block(stmt) => stmt,
        }
    }
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        self.as_node().token_literal()
    }
    fn get_span(&self) -> &Span {
        self.as_node().get_span()
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_node(), f)
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
}

impl Expr {
    fn as_node(&self) -> &dyn Node {
        match self {
            Expr::Identifier(expr) => expr,
            Expr::Integer(expr) => expr,
            Expr::Boolean(expr) => expr,
            Expr::Prefix(expr) => expr,
            Expr::Infix(expr) => expr,
            Expr::If(expr) => expr,
            Expr::Function(expr) => expr,
            Expr::Call(expr) => expr,
        }
    }
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        self.as_node().token_literal()
    }
    fn get_span(&self) -> &Span {
        self.as_node().get_span()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.as_node(), f)
    }
}

/// The root of every parse: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut statements = self.statements.iter().peekable();
        while let Some(stmt) = statements.next() {
            write!(f, "{}", stmt)?;

            // An unterminated expression would run into whatever follows it.
            if matches!(stmt, Stmt::Expression(_)) && statements.peek().is_some() {
                write!(f, ";")?;
            }
        }
        Ok(())
    }
}
