//! Namer pass: builds the symbol table
//!
//! Runs over the whole program before any expression is typed:
//! 1. collect class names, resolve `extends` clauses and reject cycles
//! 2. create class symbols, super-classes first
//! 3. declare members, method signatures, locals and closures, checking
//!    overrides and abstract method coverage along the way
//! 4. locate the entry point and derive dispatch layouts
//!
//! An inheritance cycle stops the pass after step 1; everything else is
//! reported and resolution carries on.

use super::config::CheckerConfig;
use super::error::{Diagnostics, SemanticError};
use super::layout::ClassLayout;
use super::model::SemanticModel;
use super::scope_stack::ScopeStack;
use super::symbols::{
    ClassInfo, ClosureInfo, MethodInfo, ScopeId, ScopeKind, Symbol, SymbolId, SymbolKind,
    SymbolTable, VariableInfo,
};
use mocha_parser::ast::*;
use mocha_types::{TypeContext, TypeId};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

/// Output of the Namer pass
#[derive(Debug)]
pub struct NameResolution {
    /// Scopes and symbols
    pub symbols: SymbolTable,
    /// Node annotations recorded so far
    pub model: SemanticModel,
    /// Errors found while naming
    pub diagnostics: Diagnostics,
    /// An inheritance cycle was found; members were not resolved
    pub fatal: bool,
}

/// Namer pass state
pub struct Namer<'a> {
    types: &'a mut TypeContext,
    config: &'a CheckerConfig,
    symbols: SymbolTable,
    model: SemanticModel,
    diagnostics: Diagnostics,
    ctx: ScopeStack,
    /// First definition of each class name
    classes: FxHashMap<&'a str, &'a ClassDef>,
    /// Resolved `extends` edges
    parents: FxHashMap<&'a str, &'a str>,
    class_symbols: FxHashMap<&'a str, SymbolId>,
    /// Abstract methods each resolved class leaves unimplemented
    abstract_methods: FxHashMap<&'a str, Vec<SymbolId>>,
}

impl<'a> Namer<'a> {
    /// Create a Namer writing class and function types into `types`
    pub fn new(types: &'a mut TypeContext, config: &'a CheckerConfig) -> Self {
        Self {
            types,
            config,
            symbols: SymbolTable::new(),
            model: SemanticModel::new(),
            diagnostics: Diagnostics::new(),
            ctx: ScopeStack::new(),
            classes: FxHashMap::default(),
            parents: FxHashMap::default(),
            class_symbols: FxHashMap::default(),
            abstract_methods: FxHashMap::default(),
        }
    }

    /// Run the pass over a whole program
    #[instrument(skip_all, fields(classes = program.classes.len()))]
    pub fn run(mut self, program: &'a Program) -> NameResolution {
        let order = self.collect_classes(program);
        self.resolve_parents(&order);

        if self.check_cycles(&order) {
            debug!(errors = self.diagnostics.len(), "inheritance cycle, skipping member resolution");
            return self.finish(true);
        }

        for &class in &order {
            self.create_class_symbol(class);
        }
        for &class in &order {
            self.resolve_class(class);
        }

        self.check_entry_point(program);
        self.compute_layouts();

        debug!(
            scopes = self.symbols.scope_count(),
            symbols = self.symbols.symbol_count(),
            errors = self.diagnostics.len(),
            "namer finished"
        );
        self.finish(false)
    }

    fn finish(self, fatal: bool) -> NameResolution {
        NameResolution {
            symbols: self.symbols,
            model: self.model,
            diagnostics: self.diagnostics,
            fatal,
        }
    }

    // ---- class graph ----

    /// Map names to definitions; later duplicates are reported and dropped
    fn collect_classes(&mut self, program: &'a Program) -> Vec<&'a ClassDef> {
        let mut order = Vec::with_capacity(program.classes.len());
        for class in &program.classes {
            let name = class.name.name.as_str();
            if let Some(earlier) = self.classes.get(name) {
                self.diagnostics.push(SemanticError::DeclarationConflict {
                    name: name.to_string(),
                    earlier: earlier.name.span,
                    span: class.name.span,
                });
                continue;
            }
            self.classes.insert(name, class);
            order.push(class);
        }
        order
    }

    fn resolve_parents(&mut self, order: &[&'a ClassDef]) {
        for class in order {
            let Some(parent) = &class.parent else {
                continue;
            };
            if self.classes.contains_key(parent.name.as_str()) {
                self.parents.insert(class.name.name.as_str(), parent.name.as_str());
            } else {
                self.diagnostics.push(SemanticError::ClassNotFound {
                    name: parent.name.clone(),
                    span: parent.span,
                });
            }
        }
    }

    /// Walk each class's ancestor chain, stamping visited classes with the
    /// walk's number; meeting the current stamp again closes a cycle
    fn check_cycles(&mut self, order: &[&'a ClassDef]) -> bool {
        let mut visited: FxHashMap<&str, usize> = FxHashMap::default();
        let mut found = false;

        for (walk, class) in order.iter().enumerate() {
            let mut node = class.name.name.as_str();
            if visited.contains_key(node) {
                continue;
            }
            loop {
                visited.insert(node, walk);
                let Some(&parent) = self.parents.get(node) else {
                    break;
                };
                let from = node;
                node = parent;
                match visited.get(node) {
                    None => continue,
                    Some(&stamp) if stamp == walk => {
                        if let Some(def) = self.classes.get(from) {
                            self.diagnostics.push(SemanticError::CyclicInheritance {
                                name: from.to_string(),
                                span: def.name.span,
                            });
                        }
                        found = true;
                        break;
                    }
                    Some(_) => break,
                }
            }
        }
        found
    }

    fn create_class_symbol(&mut self, class: &'a ClassDef) -> SymbolId {
        let name = class.name.name.as_str();
        if let Some(&symbol) = self.class_symbols.get(name) {
            return symbol;
        }

        let parent_def = self.parents.get(name).and_then(|p| self.classes.get(p)).copied();
        let parent = parent_def.map(|def| self.create_class_symbol(def));
        let (parent_ty, parent_scope) = match parent {
            Some(p) => {
                let symbol = self.symbols.symbol(p);
                (Some(symbol.ty), symbol.as_class().map(|c| c.scope))
            }
            None => (None, None),
        };

        let ty = self.types.class_type(name, parent_ty);
        let scope = self.symbols.new_scope(ScopeKind::Class, parent_scope);
        let info = ClassInfo {
            parent,
            scope,
            is_abstract: class.is_abstract,
            is_entry: false,
        };
        let symbol = Symbol::new(name, SymbolKind::Class(info), ty, class.name.span);
        let id = match self.symbols.declare(SymbolTable::GLOBAL, symbol) {
            Ok(id) => id,
            Err(dup) => dup.existing,
        };

        self.symbols.set_owner(scope, id);
        self.class_symbols.insert(name, id);
        self.model.set_declaration(class.id, id);
        id
    }

    // ---- members ----

    fn resolve_class(&mut self, class: &'a ClassDef) {
        let name = class.name.name.as_str();
        if self.abstract_methods.contains_key(name) {
            return;
        }
        let Some(&symbol) = self.class_symbols.get(name) else {
            return;
        };

        let parent_def = self.parents.get(name).and_then(|p| self.classes.get(p)).copied();
        let mut pending = match parent_def {
            Some(parent) => {
                self.resolve_class(parent);
                self.abstract_methods
                    .get(parent.name.name.as_str())
                    .cloned()
                    .unwrap_or_default()
            }
            None => Vec::new(),
        };

        let Some(scope) = self.symbols.symbol(symbol).as_class().map(|c| c.scope) else {
            return;
        };
        self.ctx.open(&self.symbols, scope);
        for member in &class.members {
            match member {
                Member::Var(var) => self.declare_member_var(var),
                Member::Method(method) => {
                    if let Some(method) = self.declare_method(method, symbol) {
                        self.update_abstract_methods(&mut pending, method);
                    }
                }
            }
        }
        self.ctx.close(&self.symbols);

        if !pending.is_empty() && !class.is_abstract {
            let methods = pending
                .iter()
                .map(|&m| self.symbols.symbol(m).name.clone())
                .collect();
            self.diagnostics.push(SemanticError::MissingAbstractOverride {
                class: name.to_string(),
                methods,
                span: class.name.span,
            });
        }
        self.abstract_methods.insert(name, pending);
    }

    fn declare_member_var(&mut self, var: &'a VarDef) {
        let ty = self.resolve_type(&var.type_ann);
        let name = var.name.name.as_str();

        if let Some(earlier) = self.ctx.find_conflict(&self.symbols, name) {
            let earlier = self.symbols.symbol(earlier);
            let error = if earlier.is_variable() && earlier.domain != self.ctx.current_scope() {
                SemanticError::OverridingVariable {
                    name: name.to_string(),
                    span: var.name.span,
                }
            } else {
                SemanticError::DeclarationConflict {
                    name: name.to_string(),
                    earlier: earlier.span,
                    span: var.name.span,
                }
            };
            self.diagnostics.push(error);
            return;
        }

        if self.types.is_void(ty) {
            self.diagnostics.push(SemanticError::BadVariableType {
                name: name.to_string(),
                span: var.name.span,
            });
            return;
        }
        if self.types.has_error(ty) {
            return;
        }

        let info = VariableInfo {
            is_member: true,
            is_this: false,
        };
        let symbol = Symbol::variable(name, ty, var.name.span, info);
        if let Ok(id) = self.symbols.declare(self.ctx.current_scope(), symbol) {
            self.model.set_declaration(var.id, id);
        }
    }

    /// Declare a method, or report why it can't be; returns the new symbol
    fn declare_method(&mut self, method: &'a MethodDef, class: SymbolId) -> Option<SymbolId> {
        let name = method.name.name.as_str();

        if let Some(earlier) = self.ctx.find_conflict(&self.symbols, name) {
            let symbol = self.symbols.symbol(earlier);
            let (earlier_span, earlier_ty, earlier_domain) = (symbol.span, symbol.ty, symbol.domain);

            if let Some(inherited) = symbol.as_method().copied() {
                let overridable = earlier_domain != self.ctx.current_scope()
                    && !inherited.is_static
                    && !method.modifiers.is_static
                    && !(method.modifiers.is_abstract && !inherited.is_abstract);
                if overridable {
                    let (formal, ty) = self.type_method(method);
                    if self.types.is_subtype(ty, earlier_ty) {
                        return self.define_method(method, class, formal, ty);
                    }
                    let parent = self.symbols.symbol(inherited.owner).name.clone();
                    self.diagnostics.push(SemanticError::OverrideIncompatible {
                        name: name.to_string(),
                        parent,
                        span: method.name.span,
                    });
                    return None;
                }
            }

            self.diagnostics.push(SemanticError::DeclarationConflict {
                name: name.to_string(),
                earlier: earlier_span,
                span: method.name.span,
            });
            return None;
        }

        let (formal, ty) = self.type_method(method);
        self.define_method(method, class, formal, ty)
    }

    /// Resolve a method signature, declaring `this` and the parameters in a
    /// fresh formal scope
    fn type_method(&mut self, method: &'a MethodDef) -> (ScopeId, TypeId) {
        let ret = self.resolve_type(&method.return_type);
        let formal = self
            .symbols
            .new_scope(ScopeKind::Formal, Some(self.ctx.current_scope()));
        self.ctx.open(&self.symbols, formal);

        if !method.modifiers.is_static {
            if let Some(class) = self.ctx.current_class() {
                let ty = self.symbols.symbol(class).ty;
                let info = VariableInfo {
                    is_member: false,
                    is_this: true,
                };
                let this = Symbol::variable("this", ty, method.name.span, info);
                let _ = self.symbols.declare(formal, this);
            }
        }

        let mut params = Vec::with_capacity(method.params.len());
        for param in &method.params {
            params.push(self.declare_param(param));
        }
        self.ctx.close(&self.symbols);

        let ty = self.types.function_type(params, ret).unwrap_or(TypeId::ERROR);
        (formal, ty)
    }

    fn define_method(
        &mut self,
        method: &'a MethodDef,
        class: SymbolId,
        formal: ScopeId,
        ty: TypeId,
    ) -> Option<SymbolId> {
        let info = MethodInfo {
            scope: formal,
            is_static: method.modifiers.is_static,
            is_abstract: method.modifiers.is_abstract,
            owner: class,
            is_entry: false,
        };
        let symbol = Symbol::new(&method.name.name, SymbolKind::Method(info), ty, method.name.span);
        let id = self.symbols.declare(self.ctx.current_scope(), symbol).ok()?;

        self.symbols.set_owner(formal, id);
        self.model.set_declaration(method.id, id);
        self.model.set_scope(method.id, formal);

        if let Some(body) = &method.body {
            self.ctx.open(&self.symbols, formal);
            self.visit_block(body);
            self.ctx.close(&self.symbols);
        }
        Some(id)
    }

    /// An abstract method replaces the inherited entry it overrides; a
    /// concrete one discharges it
    fn update_abstract_methods(&self, pending: &mut Vec<SymbolId>, method: SymbolId) {
        let Some(info) = self.symbols.symbol(method).as_method().copied() else {
            return;
        };
        if info.is_static {
            return;
        }

        let matched = pending.iter().position(|&inherited| self.overrides(method, inherited));
        if let Some(index) = matched {
            pending.remove(index);
        }
        if info.is_abstract {
            pending.push(method);
        }
    }

    fn overrides(&self, method: SymbolId, inherited: SymbolId) -> bool {
        let (method, inherited) = (self.symbols.symbol(method), self.symbols.symbol(inherited));
        method.name == inherited.name && self.types.is_subtype(method.ty, inherited.ty)
    }

    // ---- declarations inside bodies ----

    fn declare_param(&mut self, param: &'a Param) -> TypeId {
        let ty = self.resolve_type(&param.type_ann);
        self.declare_local(&param.name, ty, param.id)
    }

    /// Declare a parameter or typed local; returns the type to record for it
    fn declare_local(&mut self, name: &Identifier, ty: TypeId, node: NodeId) -> TypeId {
        if let Some(earlier) = self.ctx.find_conflict(&self.symbols, &name.name) {
            self.diagnostics.push(SemanticError::DeclarationConflict {
                name: name.name.clone(),
                earlier: self.symbols.symbol(earlier).span,
                span: name.span,
            });
            return if self.types.is_void(ty) { TypeId::ERROR } else { ty };
        }

        if self.types.is_void(ty) {
            self.diagnostics.push(SemanticError::BadVariableType {
                name: name.name.clone(),
                span: name.span,
            });
            return TypeId::ERROR;
        }
        if self.types.has_error(ty) {
            return TypeId::ERROR;
        }

        let symbol = Symbol::variable(&name.name, ty, name.span, VariableInfo::default());
        if let Ok(id) = self.symbols.declare(self.ctx.current_scope(), symbol) {
            self.model.set_declaration(node, id);
        }
        ty
    }

    fn visit_block(&mut self, block: &'a Block) {
        let scope = self
            .symbols
            .new_scope(ScopeKind::Local, Some(self.ctx.current_scope()));
        self.model.set_scope(block.id, scope);

        self.ctx.open(&self.symbols, scope);
        for statement in &block.statements {
            self.visit_statement(statement);
        }
        self.ctx.close(&self.symbols);
    }

    fn visit_statement(&mut self, statement: &'a Statement) {
        match statement {
            Statement::LocalVar(decl) => self.visit_local_var(decl),
            Statement::Assign(assign) => {
                self.visit_expression(&assign.target);
                self.visit_expression(&assign.value);
            }
            Statement::Expression(stmt) => self.visit_expression(&stmt.expression),
            Statement::Empty(_) | Statement::Break(_) => {}
            Statement::Block(block) => self.visit_block(block),
            Statement::If(stmt) => {
                self.visit_expression(&stmt.condition);
                self.visit_block(&stmt.then_branch);
                if let Some(else_branch) = &stmt.else_branch {
                    self.visit_block(else_branch);
                }
            }
            Statement::While(stmt) => {
                self.visit_expression(&stmt.condition);
                self.visit_block(&stmt.body);
            }
            Statement::For(stmt) => {
                // Init, condition, update and body share one scope
                let scope = self
                    .symbols
                    .new_scope(ScopeKind::Local, Some(self.ctx.current_scope()));
                self.model.set_scope(stmt.id, scope);
                self.model.set_scope(stmt.body.id, scope);

                self.ctx.open(&self.symbols, scope);
                self.visit_statement(&stmt.init);
                self.visit_expression(&stmt.condition);
                self.visit_statement(&stmt.update);
                for statement in &stmt.body.statements {
                    self.visit_statement(statement);
                }
                self.ctx.close(&self.symbols);
            }
            Statement::Return(stmt) => {
                if let Some(value) = &stmt.value {
                    self.visit_expression(value);
                }
            }
            Statement::Print(stmt) => {
                for argument in &stmt.arguments {
                    self.visit_expression(argument);
                }
            }
        }
    }

    fn visit_local_var(&mut self, decl: &'a LocalVarDecl) {
        match &decl.type_ann {
            Some(type_ann) => {
                let ty = self.resolve_type(type_ann);
                self.declare_local(&decl.name, ty, decl.id);
            }
            None => {
                // `var`: the type is inferred from the initializer later
                if let Some(earlier) = self.ctx.find_conflict(&self.symbols, &decl.name.name) {
                    self.diagnostics.push(SemanticError::DeclarationConflict {
                        name: decl.name.name.clone(),
                        earlier: self.symbols.symbol(earlier).span,
                        span: decl.name.span,
                    });
                } else {
                    let symbol = Symbol::variable(
                        &decl.name.name,
                        TypeId::ERROR,
                        decl.name.span,
                        VariableInfo::default(),
                    );
                    if let Ok(id) = self.symbols.declare(self.ctx.current_scope(), symbol) {
                        self.model.set_declaration(decl.id, id);
                    }
                }
            }
        }

        if let Some(init) = &decl.init {
            self.visit_expression(init);
        }
    }

    fn visit_expression(&mut self, expr: &'a Expression) {
        match &expr.kind {
            ExpressionKind::IntLiteral(_)
            | ExpressionKind::BoolLiteral(_)
            | ExpressionKind::StringLiteral(_)
            | ExpressionKind::Null
            | ExpressionKind::ReadInteger
            | ExpressionKind::ReadLine
            | ExpressionKind::This
            | ExpressionKind::NewClass(_) => {}
            ExpressionKind::Variable(select) => {
                if let Some(receiver) = &select.receiver {
                    self.visit_expression(receiver);
                }
            }
            ExpressionKind::Index(index) => {
                self.visit_expression(&index.array);
                self.visit_expression(&index.index);
            }
            ExpressionKind::Call(call) => {
                self.visit_expression(&call.callee);
                for argument in &call.arguments {
                    self.visit_expression(argument);
                }
            }
            ExpressionKind::Unary(unary) => self.visit_expression(&unary.operand),
            ExpressionKind::Binary(binary) => {
                self.visit_expression(&binary.left);
                self.visit_expression(&binary.right);
            }
            ExpressionKind::NewArray(new_array) => self.visit_expression(&new_array.length),
            ExpressionKind::InstanceOf(test) | ExpressionKind::Cast(test) => {
                self.visit_expression(&test.object)
            }
            ExpressionKind::Lambda(lambda) => self.visit_lambda(expr, lambda),
        }
    }

    fn visit_lambda(&mut self, expr: &'a Expression, lambda: &'a LambdaExpression) {
        let scope = self
            .symbols
            .new_scope(ScopeKind::Lambda, Some(self.ctx.current_scope()));
        self.model.set_scope(expr.id, scope);

        self.ctx.open(&self.symbols, scope);
        for param in &lambda.params {
            self.declare_param(param);
        }
        match &lambda.body {
            LambdaBody::Block(block) => self.visit_block(block),
            LambdaBody::Expression(body) => {
                let local = self.symbols.new_scope(ScopeKind::Local, Some(scope));
                self.model.set_scope(body.id, local);
                self.ctx.open(&self.symbols, local);
                self.visit_expression(body);
                self.ctx.close(&self.symbols);
            }
        }
        self.ctx.close(&self.symbols);

        // The function type is only known once the Typer has seen the body
        let info = ClosureInfo {
            scope,
            owner: self.ctx.current_class(),
        };
        let name = format!("lambda@{}", expr.span);
        let symbol = Symbol::new(name, SymbolKind::Closure(info), TypeId::ERROR, expr.span);
        if let Ok(id) = self.symbols.declare(self.ctx.current_scope(), symbol) {
            self.symbols.set_owner(scope, id);
            self.model.set_declaration(expr.id, id);
            self.model.add_closure(id);
        }
    }

    fn resolve_type(&mut self, type_ann: &TypeAnnotation) -> TypeId {
        resolve_type_annotation(self.types, &self.symbols, &mut self.diagnostics, type_ann)
    }

    // ---- whole-program facts ----

    fn check_entry_point(&mut self, program: &Program) {
        match self.find_entry_point() {
            Some((class, method)) => {
                if let SymbolKind::Class(info) = &mut self.symbols.symbol_mut(class).kind {
                    info.is_entry = true;
                }
                if let SymbolKind::Method(info) = &mut self.symbols.symbol_mut(method).kind {
                    info.is_entry = true;
                }
                self.model.set_entry_point(method);
                debug!(class = %self.config.entry_class, method = %self.config.entry_method, "entry point found");
            }
            None if self.config.require_entry_point => {
                self.diagnostics.push(SemanticError::MissingEntryPoint {
                    class: self.config.entry_class.clone(),
                    method: self.config.entry_method.clone(),
                    span: program.span,
                });
            }
            None => {}
        }
    }

    /// A non-abstract entry class declaring a static, parameterless method
    /// returning `void` under the configured name
    fn find_entry_point(&self) -> Option<(SymbolId, SymbolId)> {
        let class = self.ctx.lookup_class(&self.symbols, &self.config.entry_class)?;
        let info = self.symbols.symbol(class).as_class().copied()?;
        if info.is_abstract {
            return None;
        }

        let method = self.symbols.lookup(info.scope, &self.config.entry_method)?;
        let symbol = self.symbols.symbol(method);
        if !symbol.as_method()?.is_static {
            return None;
        }
        let signature = self.types.function(symbol.ty)?;
        (signature.return_type == TypeId::VOID && signature.arity() == 0).then_some((class, method))
    }

    /// Class symbols are created super-class first, so each parent layout
    /// exists before its children's
    fn compute_layouts(&mut self) {
        let classes: Vec<SymbolId> = self.symbols.classes().collect();
        for class in classes {
            let parent = self.symbols.symbol(class).as_class().and_then(|c| c.parent);
            let layout = ClassLayout::extend(
                parent.and_then(|p| self.model.layout(p)),
                &self.symbols,
                class,
            );
            self.model.set_layout(class, layout);
        }
    }
}

/// Turn a written type into a [`TypeId`], reporting unknown classes and
/// `void` in positions that can't hold it
pub(crate) fn resolve_type_annotation(
    types: &mut TypeContext,
    symbols: &SymbolTable,
    diagnostics: &mut Diagnostics,
    type_ann: &TypeAnnotation,
) -> TypeId {
    match &type_ann.kind {
        TypeKind::Int => TypeId::INT,
        TypeKind::Bool => TypeId::BOOL,
        TypeKind::String => TypeId::STRING,
        TypeKind::Void => TypeId::VOID,
        TypeKind::Class(name) => {
            let class = symbols
                .lookup(SymbolTable::GLOBAL, &name.name)
                .filter(|&s| symbols.symbol(s).is_class());
            match class {
                Some(class) => symbols.symbol(class).ty,
                None => {
                    diagnostics.push(SemanticError::ClassNotFound {
                        name: name.name.clone(),
                        span: name.span,
                    });
                    TypeId::ERROR
                }
            }
        }
        TypeKind::Array(element) => {
            let element = resolve_type_annotation(types, symbols, diagnostics, element);
            if types.has_error(element) {
                TypeId::ERROR
            } else if types.is_void(element) {
                diagnostics.push(SemanticError::BadArrayElementType { span: type_ann.span });
                TypeId::ERROR
            } else {
                types.array_type(element).unwrap_or(TypeId::ERROR)
            }
        }
        TypeKind::Function { return_type, params } => {
            let ret = resolve_type_annotation(types, symbols, diagnostics, return_type);
            let mut broken = types.has_error(ret);
            let mut resolved = Vec::with_capacity(params.len());
            for param in params {
                let ty = resolve_type_annotation(types, symbols, diagnostics, param);
                if types.is_void(ty) {
                    diagnostics.push(SemanticError::BadFunctionTypeArgument { span: param.span });
                    broken = true;
                } else if types.has_error(ty) {
                    broken = true;
                }
                resolved.push(ty);
            }
            if broken {
                TypeId::ERROR
            } else {
                types.function_type(resolved, ret).unwrap_or(TypeId::ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mocha_parser::Span;

    fn ann(kind: TypeKind) -> TypeAnnotation {
        TypeAnnotation {
            kind,
            span: Span::default(),
        }
    }

    #[test]
    fn test_resolve_nested_types() {
        let mut types = TypeContext::new();
        let symbols = SymbolTable::new();
        let mut diagnostics = Diagnostics::new();

        // int[](bool)
        let ty = ann(TypeKind::Function {
            return_type: Box::new(ann(TypeKind::Array(Box::new(ann(TypeKind::Int))))),
            params: vec![ann(TypeKind::Bool)],
        });
        let id = resolve_type_annotation(&mut types, &symbols, &mut diagnostics, &ty);
        assert_eq!(types.display(id), "(bool) => int[]");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_reports_void_positions() {
        let mut types = TypeContext::new();
        let symbols = SymbolTable::new();
        let mut diagnostics = Diagnostics::new();

        let array = ann(TypeKind::Array(Box::new(ann(TypeKind::Void))));
        assert_eq!(
            resolve_type_annotation(&mut types, &symbols, &mut diagnostics, &array),
            TypeId::ERROR
        );

        let function = ann(TypeKind::Function {
            return_type: Box::new(ann(TypeKind::Int)),
            params: vec![ann(TypeKind::Void)],
        });
        assert_eq!(
            resolve_type_annotation(&mut types, &symbols, &mut diagnostics, &function),
            TypeId::ERROR
        );

        let missing = ann(TypeKind::Class(Identifier::new("Nope", Span::default())));
        assert_eq!(
            resolve_type_annotation(&mut types, &symbols, &mut diagnostics, &missing),
            TypeId::ERROR
        );

        let kinds: Vec<_> = diagnostics.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                crate::error::ErrorKind::BadArrayElementType,
                crate::error::ErrorKind::BadFunctionTypeArgument,
                crate::error::ErrorKind::ClassNotFound,
            ]
        );
    }

    #[test]
    fn test_void_return_allowed_in_function_type() {
        let mut types = TypeContext::new();
        let symbols = SymbolTable::new();
        let mut diagnostics = Diagnostics::new();

        let ty = ann(TypeKind::Function {
            return_type: Box::new(ann(TypeKind::Void)),
            params: vec![],
        });
        let id = resolve_type_annotation(&mut types, &symbols, &mut diagnostics, &ty);
        assert_eq!(types.display(id), "() => void");
    }
}
