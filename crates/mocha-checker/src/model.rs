//! Semantic model: the annotations handed to code generation
//!
//! The tree itself is never mutated. Every fact the passes derive about a
//! node is stored here, keyed by the node's [`NodeId`].

use super::layout::ClassLayout;
use super::symbols::{ScopeId, SymbolId};
use mocha_parser::NodeId;
use mocha_types::TypeId;
use rustc_hash::FxHashMap;

/// What a name or selection expression refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// A variable; `implicit_this` when a bare name reads a member
    Variable {
        /// Variable symbol
        symbol: SymbolId,
        /// Receiver is the implicit `this`
        implicit_this: bool,
    },
    /// A class name used as the receiver of a static call
    ClassName(SymbolId),
    /// A method used as a value or callee
    Method {
        /// Method symbol
        symbol: SymbolId,
        /// Selected through a class name
        static_access: bool,
        /// Receiver is the implicit `this`
        implicit_this: bool,
    },
    /// `array.length`
    ArrayLength,
    /// Explicit `this`
    This(SymbolId),
    /// Class named by `new`, `instanceof` or a cast
    Class(SymbolId),
}

impl Reference {
    /// The referenced symbol, if any
    pub fn symbol(&self) -> Option<SymbolId> {
        match *self {
            Reference::Variable { symbol, .. }
            | Reference::Method { symbol, .. }
            | Reference::ClassName(symbol)
            | Reference::This(symbol)
            | Reference::Class(symbol) => Some(symbol),
            Reference::ArrayLength => None,
        }
    }

    /// Whether this names a method
    pub fn is_method(&self) -> bool {
        matches!(self, Reference::Method { .. })
    }
}

/// Annotations for one program
#[derive(Debug, Clone, Default)]
pub struct SemanticModel {
    declarations: FxHashMap<NodeId, SymbolId>,
    scopes: FxHashMap<NodeId, ScopeId>,
    types: FxHashMap<NodeId, TypeId>,
    references: FxHashMap<NodeId, Reference>,
    layouts: FxHashMap<SymbolId, ClassLayout>,
    closures: Vec<SymbolId>,
    entry_point: Option<SymbolId>,
}

impl SemanticModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the symbol declared by a class, member, parameter, local or closure node
    pub fn set_declaration(&mut self, node: NodeId, symbol: SymbolId) {
        self.declarations.insert(node, symbol);
    }

    /// Symbol declared by a node
    pub fn declaration(&self, node: NodeId) -> Option<SymbolId> {
        self.declarations.get(&node).copied()
    }

    /// Record the scope opened by a method, block, loop or closure node
    pub fn set_scope(&mut self, node: NodeId, scope: ScopeId) {
        self.scopes.insert(node, scope);
    }

    /// Scope opened by a node
    pub fn scope(&self, node: NodeId) -> Option<ScopeId> {
        self.scopes.get(&node).copied()
    }

    /// Record the type of an expression
    pub fn set_type(&mut self, node: NodeId, ty: TypeId) {
        self.types.insert(node, ty);
    }

    /// Type of an expression
    pub fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.types.get(&node).copied()
    }

    /// Record what an expression refers to
    pub fn set_reference(&mut self, node: NodeId, reference: Reference) {
        self.references.insert(node, reference);
    }

    /// What an expression refers to
    pub fn reference(&self, node: NodeId) -> Option<Reference> {
        self.references.get(&node).copied()
    }

    /// Record the dispatch layout of a class
    pub fn set_layout(&mut self, class: SymbolId, layout: ClassLayout) {
        self.layouts.insert(class, layout);
    }

    /// Dispatch layout of a class
    pub fn layout(&self, class: SymbolId) -> Option<&ClassLayout> {
        self.layouts.get(&class)
    }

    /// Register a closure symbol
    pub fn add_closure(&mut self, closure: SymbolId) {
        self.closures.push(closure);
    }

    /// All closures in source order of their completion
    pub fn closures(&self) -> &[SymbolId] {
        &self.closures
    }

    /// Record the entry method
    pub fn set_entry_point(&mut self, method: SymbolId) {
        self.entry_point = Some(method);
    }

    /// The entry method, if one was found
    pub fn entry_point(&self) -> Option<SymbolId> {
        self.entry_point
    }
}
