//! Scope and symbol arena
//!
//! All scopes and symbols of a compilation unit live in one [`SymbolTable`]
//! and refer to each other by index. Scope kinds:
//!
//! - `Global`: top-level class symbols
//! - `Class`: members of one class; its parent is the super-class scope
//! - `Formal`: method parameters plus `this` for non-static methods
//! - `Local`: declarations of one block (or of a `for` header and body)
//! - `Lambda`: closure parameters and the closure's capture set

use super::captures::CaptureSet;
use mocha_parser::Span;
use mocha_types::TypeId;
use rustc_hash::FxHashMap;

/// Scope identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

/// Symbol identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// Scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Top-level classes
    Global,
    /// Class members
    Class,
    /// Method parameters
    Formal,
    /// Block declarations
    Local,
    /// Closure parameters
    Lambda,
}

impl ScopeKind {
    /// Formal, Local and Lambda scopes live inside a method body
    pub fn is_method_level(self) -> bool {
        matches!(self, ScopeKind::Formal | ScopeKind::Local | ScopeKind::Lambda)
    }
}

/// Scope in the scope forest
#[derive(Debug, Clone)]
pub struct Scope {
    /// Scope ID
    pub id: ScopeId,
    /// Scope kind
    pub kind: ScopeKind,
    /// Enclosing scope; for class scopes, the super-class scope
    pub parent: Option<ScopeId>,
    /// Class, method or closure symbol that owns this scope
    pub owner: Option<SymbolId>,
    /// Scopes whose parent is this scope, in creation order
    pub children: Vec<ScopeId>,
    /// Captured outer symbols (Lambda scopes only)
    pub captures: CaptureSet,
    symbols: FxHashMap<String, SymbolId>,
    order: Vec<SymbolId>,
}

impl Scope {
    fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Scope {
            id,
            kind,
            parent,
            owner: None,
            children: Vec::new(),
            captures: CaptureSet::new(),
            symbols: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Symbols in declaration order
    pub fn symbols(&self) -> &[SymbolId] {
        &self.order
    }

    /// Look up a name in this scope only
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }
}

/// Variable data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableInfo {
    /// Declared directly in a class scope
    pub is_member: bool,
    /// The implicit receiver of a non-static method
    pub is_this: bool,
}

/// Method data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    /// Formal scope holding the parameters
    pub scope: ScopeId,
    /// `static` modifier
    pub is_static: bool,
    /// `abstract` modifier
    pub is_abstract: bool,
    /// Declaring class
    pub owner: SymbolId,
    /// This is the program entry point
    pub is_entry: bool,
}

/// Class data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    /// Resolved super-class
    pub parent: Option<SymbolId>,
    /// Member scope
    pub scope: ScopeId,
    /// `abstract` modifier
    pub is_abstract: bool,
    /// Holds the program entry point
    pub is_entry: bool,
}

/// Closure data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosureInfo {
    /// Lambda scope holding the parameters
    pub scope: ScopeId,
    /// Class in which the closure is written
    pub owner: Option<SymbolId>,
}

/// Symbol kind with its kind-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Member, local, parameter or `this`
    Variable(VariableInfo),
    /// Method declaration
    Method(MethodInfo),
    /// Class declaration
    Class(ClassInfo),
    /// Anonymous function, named after its position
    Closure(ClosureInfo),
}

/// Symbol information
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Symbol name
    pub name: String,
    /// Symbol kind
    pub kind: SymbolKind,
    /// Type of this symbol; `error` until known
    pub ty: TypeId,
    /// Scope where this symbol was declared
    pub domain: ScopeId,
    /// Source location of the name
    pub span: Span,
}

impl Symbol {
    /// Create a variable symbol
    pub fn variable(name: impl Into<String>, ty: TypeId, span: Span, info: VariableInfo) -> Self {
        Self::new(name, SymbolKind::Variable(info), ty, span)
    }

    /// Create a symbol; the domain is set when it is declared
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: TypeId, span: Span) -> Self {
        Symbol {
            name: name.into(),
            kind,
            ty,
            domain: ScopeId(0),
            span,
        }
    }

    /// Check if this is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable(_))
    }

    /// Check if this is a member variable
    pub fn is_member_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable(v) if v.is_member)
    }

    /// Check if this is a method
    pub fn is_method(&self) -> bool {
        matches!(self.kind, SymbolKind::Method(_))
    }

    /// Check if this is a class
    pub fn is_class(&self) -> bool {
        matches!(self.kind, SymbolKind::Class(_))
    }

    /// Method data, if this is a method
    pub fn as_method(&self) -> Option<&MethodInfo> {
        match &self.kind {
            SymbolKind::Method(m) => Some(m),
            _ => None,
        }
    }

    /// Class data, if this is a class
    pub fn as_class(&self) -> Option<&ClassInfo> {
        match &self.kind {
            SymbolKind::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Closure data, if this is a closure
    pub fn as_closure(&self) -> Option<&ClosureInfo> {
        match &self.kind {
            SymbolKind::Closure(c) => Some(c),
            _ => None,
        }
    }
}

/// Error indicating a duplicate symbol definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateSymbolError {
    /// Symbol already holding the name
    pub existing: SymbolId,
    /// Location of the original definition
    pub original: Span,
}

/// Arena of scopes and symbols
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// The global scope
    pub const GLOBAL: ScopeId = ScopeId(0);

    /// Create a new symbol table with a global scope
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(Self::GLOBAL, ScopeKind::Global, None)],
            symbols: Vec::new(),
        }
    }

    /// Create a scope nested in `parent`
    pub fn new_scope(&mut self, kind: ScopeKind, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, kind, parent));
        if let Some(parent) = parent {
            self.scopes[parent.0 as usize].children.push(id);
        }
        id
    }

    /// Record the symbol that owns a scope
    pub fn set_owner(&mut self, scope: ScopeId, owner: SymbolId) {
        self.scopes[scope.0 as usize].owner = Some(owner);
    }

    /// Declare a symbol in `scope`
    ///
    /// Returns an error if a symbol with the same name already exists there.
    pub fn declare(&mut self, scope: ScopeId, mut symbol: Symbol) -> Result<SymbolId, DuplicateSymbolError> {
        if let Some(existing) = self.scopes[scope.0 as usize].get(&symbol.name) {
            return Err(DuplicateSymbolError {
                existing,
                original: self.symbol(existing).span,
            });
        }

        let id = SymbolId(self.symbols.len() as u32);
        symbol.domain = scope;
        let target = &mut self.scopes[scope.0 as usize];
        target.symbols.insert(symbol.name.clone(), id);
        target.order.push(id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Look up a name in one scope only
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope).get(name)
    }

    /// Look up a name following parent links: class scopes walk the
    /// super-class chain, inner scopes walk outward
    pub fn lookup_chain(&self, mut scope: ScopeId, name: &str) -> Option<SymbolId> {
        loop {
            let current = self.scope(scope);
            if let Some(symbol) = current.get(name) {
                return Some(symbol);
            }
            scope = current.parent?;
        }
    }

    /// Get a scope by ID
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    /// Get a symbol by ID
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    /// Get a mutable symbol by ID
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    /// Update the type of a symbol (inferred `var` and closure types)
    pub fn set_type(&mut self, id: SymbolId, ty: TypeId) {
        self.symbols[id.0 as usize].ty = ty;
    }

    /// Add a symbol to a lambda scope's capture set
    pub fn add_capture(&mut self, lambda: ScopeId, symbol: SymbolId) -> bool {
        let declared_at = self.symbol(symbol).span;
        self.scopes[lambda.0 as usize].captures.insert(symbol, declared_at)
    }

    /// The global scope
    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    /// Get the number of scopes in the symbol table
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Get the number of symbols in the symbol table
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Iterate over all scopes
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// Class symbols in declaration order
    pub fn classes(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.global_scope().symbols().iter().copied()
    }

    /// Whether class `sub` is `sup` or inherits from it
    pub fn inherits(&self, sub: SymbolId, sup: SymbolId) -> bool {
        let mut current = Some(sub);
        while let Some(class) = current {
            if class == sup {
                return true;
            }
            current = self.symbol(class).as_class().and_then(|c| c.parent);
        }
        false
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize) -> Span {
        Span::new(start, start + 1, 1, start as u32 + 1)
    }

    fn var(name: &str, start: usize) -> Symbol {
        Symbol::variable(name, TypeId::INT, span(start), VariableInfo::default())
    }

    #[test]
    fn test_symbol_table_new() {
        let table = SymbolTable::new();
        assert_eq!(table.scope_count(), 1);
        assert_eq!(table.global_scope().kind, ScopeKind::Global);
        assert_eq!(table.symbol_count(), 0);
    }

    #[test]
    fn test_nested_scopes_record_children() {
        let mut table = SymbolTable::new();
        let class = table.new_scope(ScopeKind::Class, None);
        let formal = table.new_scope(ScopeKind::Formal, Some(class));
        let local = table.new_scope(ScopeKind::Local, Some(formal));

        assert_eq!(table.scope(local).parent, Some(formal));
        assert_eq!(table.scope(formal).children, vec![local]);
        assert_eq!(table.scope(class).children, vec![formal]);
    }

    #[test]
    fn test_declare_sets_domain_and_order() {
        let mut table = SymbolTable::new();
        let local = table.new_scope(ScopeKind::Local, None);
        let b = table.declare(local, var("b", 0)).unwrap();
        let a = table.declare(local, var("a", 5)).unwrap();

        assert_eq!(table.symbol(a).domain, local);
        assert_eq!(table.scope(local).symbols(), &[b, a]);
        assert_eq!(table.lookup(local, "a"), Some(a));
    }

    #[test]
    fn test_duplicate_symbol_error() {
        let mut table = SymbolTable::new();
        let local = table.new_scope(ScopeKind::Local, None);
        let first = table.declare(local, var("x", 0)).unwrap();

        let err = table.declare(local, var("x", 10)).unwrap_err();
        assert_eq!(err.existing, first);
        assert_eq!(err.original, span(0));
        assert_eq!(table.symbol_count(), 1);
    }

    #[test]
    fn test_lookup_chain_walks_parents() {
        let mut table = SymbolTable::new();
        let base = table.new_scope(ScopeKind::Class, None);
        let derived = table.new_scope(ScopeKind::Class, Some(base));
        let x = table.declare(base, var("x", 0)).unwrap();

        assert_eq!(table.lookup(derived, "x"), None);
        assert_eq!(table.lookup_chain(derived, "x"), Some(x));
        assert_eq!(table.lookup_chain(derived, "y"), None);
    }

    #[test]
    fn test_captures_on_lambda_scope() {
        let mut table = SymbolTable::new();
        let local = table.new_scope(ScopeKind::Local, None);
        let lambda = table.new_scope(ScopeKind::Lambda, Some(local));
        let y = table.declare(local, var("y", 8)).unwrap();
        let x = table.declare(local, var("x", 2)).unwrap();

        assert!(table.add_capture(lambda, y));
        assert!(table.add_capture(lambda, x));
        assert!(!table.add_capture(lambda, y));
        let captured: Vec<SymbolId> = table.scope(lambda).captures.iter().collect();
        assert_eq!(captured, vec![x, y]);
    }
}
