//! Abstract Syntax Tree for Mocha
//!
//! Every node that the semantic passes annotate carries a [`NodeId`]; the
//! annotations themselves live in side tables keyed by that id.

pub mod class;
pub mod expression;
pub mod statement;
pub mod types;

pub use class::*;
pub use expression::*;
pub use statement::*;
pub use types::*;

use crate::token::Span;
use std::fmt;

/// Identity of a tree node, unique within one [`Program`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A name together with where it was written
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Root of a compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Class definitions in source order
    pub classes: Vec<ClassDef>,

    pub span: Span,

    /// Number of node ids handed out while parsing
    pub node_count: u32,
}
