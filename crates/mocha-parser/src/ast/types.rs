//! Type annotation AST nodes

use super::Identifier;
use crate::token::Span;

/// A type as written in source
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub kind: TypeKind,
    pub span: Span,
}

/// Type annotation variants
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `void`
    Void,
    /// `class Name`
    Class(Identifier),
    /// `T[]`
    Array(Box<TypeAnnotation>),
    /// `R(T1, T2)`: a function from T1, T2 to R
    Function {
        return_type: Box<TypeAnnotation>,
        params: Vec<TypeAnnotation>,
    },
}
