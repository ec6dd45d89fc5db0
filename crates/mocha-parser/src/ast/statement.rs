//! Statement AST nodes
//!
//! Bodies of `if`, `while` and `for` are always blocks; the parser wraps a
//! single statement in a block of its own.

use super::{Expression, Identifier, NodeId, TypeAnnotation};
use crate::token::Span;

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: NodeId,
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Statement inside a method or closure body
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Local variable declaration: `type x (= e)?` or `var x = e`
    LocalVar(LocalVarDecl),

    /// Assignment: `lvalue = e`
    Assign(AssignStatement),

    /// Expression evaluated for its effect
    Expression(ExpressionStatement),

    /// Empty statement
    Empty(Span),

    /// Nested block
    Block(Block),

    /// If statement
    If(IfStatement),

    /// While loop
    While(WhileStatement),

    /// For loop
    For(ForStatement),

    /// Break statement
    Break(Span),

    /// Return statement
    Return(ReturnStatement),

    /// `Print(e1, e2, ...)`
    Print(PrintStatement),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::LocalVar(s) => &s.span,
            Statement::Assign(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::Empty(span) => span,
            Statement::Block(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::While(s) => &s.span,
            Statement::For(s) => &s.span,
            Statement::Break(span) => span,
            Statement::Return(s) => &s.span,
            Statement::Print(s) => &s.span,
        }
    }
}

/// Local variable declaration.
///
/// `type_ann` is `None` for `var x = e`, whose type comes from `e`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVarDecl {
    pub id: NodeId,
    pub type_ann: Option<TypeAnnotation>,
    pub name: Identifier,
    pub init: Option<Expression>,
    /// Position of the `=`, present with `init`
    pub assign_span: Option<Span>,
    pub span: Span,
}

/// `target = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub target: Expression,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Block,
    pub else_branch: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
    pub span: Span,
}

/// `for (init; condition; update) body`
///
/// The loop owns one scope shared by `init` and the statements of `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub id: NodeId,
    pub init: Box<Statement>,
    pub condition: Expression,
    pub update: Box<Statement>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStatement {
    pub arguments: Vec<Expression>,
    pub span: Span,
}
