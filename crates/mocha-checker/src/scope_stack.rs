//! Resolution context used while walking the tree
//!
//! The stack mirrors the lexical nesting at the current node. Opening a class
//! scope also opens every ancestor class scope below it, so members inherited
//! from any super-class are visible.

use super::symbols::{ScopeId, ScopeKind, SymbolId, SymbolTable};
use mocha_parser::Span;

/// Stack of open scopes plus the class and method being visited
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    stack: Vec<ScopeId>,
    current_class: Option<SymbolId>,
    current_method: Option<SymbolId>,
}

impl ScopeStack {
    /// Create an empty stack; the global scope is always implicitly open
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope
    ///
    /// Class scopes pull in their ancestors first and set the current class;
    /// formal scopes set the current method.
    pub fn open(&mut self, table: &SymbolTable, scope: ScopeId) {
        let info = table.scope(scope);
        tracing::trace!(scope = scope.0, kind = ?info.kind, "open scope");
        match info.kind {
            ScopeKind::Global => return,
            ScopeKind::Class => {
                if let Some(parent) = info.parent {
                    self.open(table, parent);
                }
                self.current_class = info.owner;
            }
            ScopeKind::Formal => self.current_method = info.owner,
            ScopeKind::Local | ScopeKind::Lambda => {}
        }
        self.stack.push(scope);
    }

    /// Close the innermost scope; closing a class scope closes its ancestors too
    pub fn close(&mut self, table: &SymbolTable) {
        let Some(scope) = self.stack.pop() else {
            return;
        };
        tracing::trace!(scope = scope.0, "close scope");
        match table.scope(scope).kind {
            ScopeKind::Class => {
                while self.stack.last().is_some_and(|&s| table.scope(s).kind == ScopeKind::Class) {
                    self.stack.pop();
                }
                self.current_class = None;
            }
            ScopeKind::Formal => self.current_method = None,
            _ => {}
        }
    }

    /// Innermost open scope
    pub fn current_scope(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(SymbolTable::GLOBAL)
    }

    /// Class being visited
    pub fn current_class(&self) -> Option<SymbolId> {
        self.current_class
    }

    /// Method being visited
    pub fn current_method(&self) -> Option<SymbolId> {
        self.current_method
    }

    /// Open scopes, innermost first
    pub fn open_scopes(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.stack.iter().rev().copied()
    }

    /// Search open scopes innermost-out, then the global scope
    pub fn lookup(&self, table: &SymbolTable, name: &str) -> Option<SymbolId> {
        self.find_while(table, name, |_| true, |_| true)
    }

    /// Like [`lookup`](Self::lookup), but a local variable is only visible at
    /// positions after its declaration
    pub fn lookup_before(&self, table: &SymbolTable, name: &str, pos: Span) -> Option<SymbolId> {
        self.find_while(
            table,
            name,
            |_| true,
            |symbol| {
                let symbol = table.symbol(symbol);
                !(table.scope(symbol.domain).kind == ScopeKind::Local && symbol.span.start >= pos.start)
            },
        )
    }

    /// Find an earlier declaration that a new declaration of `name` in the
    /// current scope would clash with
    ///
    /// Inside a method only the method's own scopes (and global class names)
    /// are searched, so locals may shadow members.
    pub fn find_conflict(&self, table: &SymbolTable, name: &str) -> Option<SymbolId> {
        if table.scope(self.current_scope()).kind.is_method_level() {
            self.find_while(table, name, |kind| kind.is_method_level(), |_| true)
        } else {
            self.lookup(table, name)
        }
    }

    /// Look up a class by name in the global scope
    pub fn lookup_class(&self, table: &SymbolTable, name: &str) -> Option<SymbolId> {
        table
            .lookup(SymbolTable::GLOBAL, name)
            .filter(|&symbol| table.symbol(symbol).is_class())
    }

    /// Walk open scopes innermost-out while `cond` holds for their kind, then
    /// the global scope, returning the first symbol named `name` that passes
    /// `accept`
    fn find_while(
        &self,
        table: &SymbolTable,
        name: &str,
        cond: impl Fn(ScopeKind) -> bool,
        accept: impl Fn(SymbolId) -> bool,
    ) -> Option<SymbolId> {
        for scope in self.open_scopes() {
            if !cond(table.scope(scope).kind) {
                break;
            }
            if let Some(symbol) = table.lookup(scope, name) {
                if accept(symbol) {
                    return Some(symbol);
                }
            }
        }
        table.lookup(SymbolTable::GLOBAL, name).filter(|&symbol| accept(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{ClassInfo, Symbol, SymbolKind, VariableInfo};
    use mocha_types::TypeId;

    fn span(start: usize) -> Span {
        Span::new(start, start + 1, 1, start as u32 + 1)
    }

    fn var(name: &str, start: usize, is_member: bool) -> Symbol {
        Symbol::variable(name, TypeId::INT, span(start), VariableInfo { is_member, is_this: false })
    }

    /// class A { x } class B extends A { y }, with B's class symbol owning its scope
    fn hierarchy(table: &mut SymbolTable) -> (ScopeId, ScopeId, SymbolId) {
        let a = table.new_scope(ScopeKind::Class, None);
        let b = table.new_scope(ScopeKind::Class, Some(a));
        let class_b = table
            .declare(
                SymbolTable::GLOBAL,
                Symbol::new(
                    "B",
                    SymbolKind::Class(ClassInfo { parent: None, scope: b, is_abstract: false, is_entry: false }),
                    TypeId::ERROR,
                    span(0),
                ),
            )
            .unwrap();
        table.set_owner(b, class_b);
        table.declare(a, var("x", 1, true)).unwrap();
        table.declare(b, var("y", 2, true)).unwrap();
        (a, b, class_b)
    }

    #[test]
    fn test_open_class_opens_ancestors() {
        let mut table = SymbolTable::new();
        let (a, b, class_b) = hierarchy(&mut table);
        let mut ctx = ScopeStack::new();

        ctx.open(&table, b);
        assert_eq!(ctx.open_scopes().collect::<Vec<_>>(), vec![b, a]);
        assert_eq!(ctx.current_class(), Some(class_b));
        assert!(ctx.lookup(&table, "x").is_some());

        ctx.close(&table);
        assert_eq!(ctx.open_scopes().count(), 0);
        assert_eq!(ctx.current_class(), None);
        assert_eq!(ctx.current_scope(), SymbolTable::GLOBAL);
    }

    #[test]
    fn test_lookup_before_hides_later_locals() {
        let mut table = SymbolTable::new();
        let (_, b, _) = hierarchy(&mut table);
        let formal = table.new_scope(ScopeKind::Formal, Some(b));
        let local = table.new_scope(ScopeKind::Local, Some(formal));
        let param = table.declare(formal, var("p", 20, false)).unwrap();
        let z = table.declare(local, var("z", 30, false)).unwrap();

        let mut ctx = ScopeStack::new();
        ctx.open(&table, b);
        ctx.open(&table, formal);
        ctx.open(&table, local);

        assert_eq!(ctx.lookup_before(&table, "z", span(25)), None);
        assert_eq!(ctx.lookup_before(&table, "z", span(30)), None);
        assert_eq!(ctx.lookup_before(&table, "z", span(31)), Some(z));
        // Parameters are not local declarations
        assert_eq!(ctx.lookup_before(&table, "p", span(0)), Some(param));
    }

    #[test]
    fn test_find_conflict_inside_method_ignores_members() {
        let mut table = SymbolTable::new();
        let (_, b, _) = hierarchy(&mut table);
        let formal = table.new_scope(ScopeKind::Formal, Some(b));
        let local = table.new_scope(ScopeKind::Local, Some(formal));
        let p = table.declare(formal, var("p", 20, false)).unwrap();

        let mut ctx = ScopeStack::new();
        ctx.open(&table, b);
        assert!(ctx.find_conflict(&table, "x").is_some());

        ctx.open(&table, formal);
        ctx.open(&table, local);
        assert_eq!(ctx.find_conflict(&table, "x"), None);
        assert_eq!(ctx.find_conflict(&table, "p"), Some(p));
        assert!(ctx.find_conflict(&table, "B").is_some());
    }

    #[test]
    fn test_lookup_class_only_returns_classes() {
        let mut table = SymbolTable::new();
        let (_, _, class_b) = hierarchy(&mut table);
        let ctx = ScopeStack::new();
        assert_eq!(ctx.lookup_class(&table, "B"), Some(class_b));
        assert_eq!(ctx.lookup_class(&table, "A"), None);
    }
}
