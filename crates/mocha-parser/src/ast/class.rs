//! Class and member definitions

use super::{Block, Identifier, NodeId, TypeAnnotation};
use crate::token::Span;

/// `abstract? class Name (extends Parent)? { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub id: NodeId,
    pub is_abstract: bool,
    pub name: Identifier,
    pub parent: Option<Identifier>,
    pub members: Vec<Member>,
    pub span: Span,
}

/// A member of a class body
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Member variable
    Var(VarDef),
    /// Method (static, abstract, or virtual)
    Method(MethodDef),
}

impl Member {
    /// Node id of the member
    pub fn id(&self) -> NodeId {
        match self {
            Member::Var(v) => v.id,
            Member::Method(m) => m.id,
        }
    }

    /// Declared name of the member
    pub fn name(&self) -> &Identifier {
        match self {
            Member::Var(v) => &v.name,
            Member::Method(m) => &m.name,
        }
    }
}

/// Member variable: `type name;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub id: NodeId,
    pub type_ann: TypeAnnotation,
    pub name: Identifier,
    pub span: Span,
}

/// Method modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_abstract: bool,
}

/// Method definition; `body` is `None` exactly when the method is abstract
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub id: NodeId,
    pub modifiers: Modifiers,
    pub return_type: TypeAnnotation,
    pub name: Identifier,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    pub span: Span,
}

impl MethodDef {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }
}

/// Formal parameter of a method or closure
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub id: NodeId,
    pub type_ann: TypeAnnotation,
    pub name: Identifier,
    pub span: Span,
}
