//! Expression AST nodes

use super::{Block, Identifier, NodeId, Param, TypeAnnotation};
use crate::token::Span;
use std::fmt;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub id: NodeId,
    pub kind: ExpressionKind,
    pub span: Span,
}

/// Expression variants
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    /// Integer literal: 42, 0x2A
    IntLiteral(i32),

    /// Boolean literal: true, false
    BoolLiteral(bool),

    /// String literal: "hello"
    StringLiteral(String),

    /// `null`
    Null,

    /// `ReadInteger()`
    ReadInteger,

    /// `ReadLine()`
    ReadLine,

    /// `this`
    This,

    /// Name, optionally selected from a receiver: `x`, `e.x`
    Variable(VarSelect),

    /// Array element: `a[i]`
    Index(IndexExpression),

    /// Call of a function-typed value: `f(args)`
    Call(CallExpression),

    /// Unary operation: `-e`, `!e`
    Unary(UnaryExpression),

    /// Binary operation: `a + b`
    Binary(BinaryExpression),

    /// Object creation: `new A()`
    NewClass(NewClassExpression),

    /// Array creation: `new int[n]`
    NewArray(NewArrayExpression),

    /// Dynamic type test: `instanceof(e, A)`
    InstanceOf(ClassTestExpression),

    /// Downcast: `(class A) e`
    Cast(ClassTestExpression),

    /// Closure: `fun (params) => e` or `fun (params) { ... }`
    Lambda(LambdaExpression),
}

impl Expression {
    /// Check if this expression can appear on the left of `=`
    pub fn is_lvalue(&self) -> bool {
        matches!(self.kind, ExpressionKind::Variable(_) | ExpressionKind::Index(_))
    }
}

/// `receiver.name` or bare `name`
#[derive(Debug, Clone, PartialEq)]
pub struct VarSelect {
    pub receiver: Option<Box<Expression>>,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub array: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClassExpression {
    pub class: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArrayExpression {
    pub element: TypeAnnotation,
    pub length: Box<Expression>,
}

/// Operand and class name of `instanceof` and casts
#[derive(Debug, Clone, PartialEq)]
pub struct ClassTestExpression {
    pub object: Box<Expression>,
    pub class: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    pub params: Vec<Param>,
    pub body: LambdaBody,
}

/// Body of a closure
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// `=> e`
    Expression(Box<Expression>),
    /// `{ ... }`
    Block(Block),
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `!`
    Not,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOperator {
    /// `+ - * / %`
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
        )
    }

    /// `&& ||`
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    /// `== !=`
    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOperator::Equal | BinaryOperator::NotEqual)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
            UnaryOperator::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        };
        write!(f, "{}", op)
    }
}
