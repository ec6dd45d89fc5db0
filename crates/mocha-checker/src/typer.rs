//! Typer pass: types every expression and checks statements
//!
//! Runs after the Namer over the same scopes. Besides computing the type of
//! each expression it resolves names that depend on position (a local is
//! only visible after its declaration), records which symbols each lambda
//! captures, infers `var` and lambda types, and checks return coverage.
//!
//! `error` is absorbing: once a subexpression fails to type, enclosing checks
//! stay quiet instead of reporting follow-on errors.

use super::error::{Diagnostics, SemanticError};
use super::model::{Reference, SemanticModel};
use super::namer::resolve_type_annotation;
use super::scope_stack::ScopeStack;
use super::symbols::{ScopeKind, SymbolId, SymbolKind, SymbolTable};
use mocha_parser::ast::*;
use mocha_parser::Span;
use mocha_types::{TypeContext, TypeId};
use tracing::{debug, instrument};

/// What a statement tells about returning
#[derive(Debug, Clone, Copy, Default)]
struct Flow {
    /// Every path through the statement ends in a `return`
    returns: bool,
    /// Join of the types of all reachable `return`s
    ret: Option<TypeId>,
}

/// Typer pass state
pub struct Typer<'a> {
    types: &'a mut TypeContext,
    symbols: &'a mut SymbolTable,
    model: &'a mut SemanticModel,
    diagnostics: Diagnostics,
    ctx: ScopeStack,
    loop_depth: u32,
    lambda_depth: u32,
    /// Name of the local whose initializer is being typed
    local_def_pos: Option<Span>,
    /// Local being declared, hidden inside its initializer's lambdas too
    defining: Option<(SymbolId, Span)>,
}

impl<'a> Typer<'a> {
    /// Create a Typer over the Namer's output
    pub fn new(
        types: &'a mut TypeContext,
        symbols: &'a mut SymbolTable,
        model: &'a mut SemanticModel,
    ) -> Self {
        Self {
            types,
            symbols,
            model,
            diagnostics: Diagnostics::new(),
            ctx: ScopeStack::new(),
            loop_depth: 0,
            lambda_depth: 0,
            local_def_pos: None,
            defining: None,
        }
    }

    /// Check every method body in the program
    #[instrument(skip_all)]
    pub fn check_program(mut self, program: &Program) -> Diagnostics {
        for class in &program.classes {
            let Some(symbol) = self.model.declaration(class.id) else {
                continue;
            };
            let Some(scope) = self.symbols.symbol(symbol).as_class().map(|c| c.scope) else {
                continue;
            };

            self.ctx.open(self.symbols, scope);
            for member in &class.members {
                if let Member::Method(method) = member {
                    self.check_method(method);
                }
            }
            self.ctx.close(self.symbols);
        }

        debug!(
            nodes = program.node_count,
            closures = self.model.closures().len(),
            errors = self.diagnostics.len(),
            "typer finished"
        );
        self.diagnostics
    }

    fn check_method(&mut self, method: &MethodDef) {
        let (Some(symbol), Some(formal)) = (self.model.declaration(method.id), self.model.scope(method.id)) else {
            return;
        };
        let Some(body) = &method.body else {
            return;
        };

        self.ctx.open(self.symbols, formal);
        let flow = self.check_block(body);
        self.ctx.close(self.symbols);

        let ret = self.return_type_of(symbol);
        if !self.types.is_void(ret) && !self.types.has_error(ret) && !flow.returns {
            self.diagnostics.push(SemanticError::MissingReturn { span: body.span });
        }
    }

    fn return_type_of(&self, method: SymbolId) -> TypeId {
        self.types
            .function(self.symbols.symbol(method).ty)
            .map_or(TypeId::ERROR, |f| f.return_type)
    }

    fn merge(&mut self, a: Option<TypeId>, b: Option<TypeId>) -> Option<TypeId> {
        match (a, b) {
            (Some(a), Some(b)) => Some(self.types.join(a, b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    // ---- statements ----

    fn check_block(&mut self, block: &Block) -> Flow {
        let scope = self.model.scope(block.id);
        if let Some(scope) = scope {
            self.ctx.open(self.symbols, scope);
        }
        let flow = self.check_statements(&block.statements);
        if scope.is_some() {
            self.ctx.close(self.symbols);
        }
        flow
    }

    /// A sequence returns when its last statement does
    fn check_statements(&mut self, statements: &[Statement]) -> Flow {
        let mut flow = Flow::default();
        for statement in statements {
            let next = self.check_statement(statement);
            flow.ret = self.merge(flow.ret, next.ret);
            flow.returns = next.returns;
        }
        flow
    }

    fn check_statement(&mut self, statement: &Statement) -> Flow {
        match statement {
            Statement::LocalVar(decl) => {
                self.check_local_var(decl);
                Flow::default()
            }
            Statement::Assign(assign) => {
                self.check_assign(assign);
                Flow::default()
            }
            Statement::Expression(stmt) => {
                self.check_expression(&stmt.expression);
                Flow::default()
            }
            Statement::Empty(_) => Flow::default(),
            Statement::Block(block) => self.check_block(block),
            Statement::If(stmt) => {
                self.check_test_expression(&stmt.condition);
                let then_flow = self.check_block(&stmt.then_branch);
                let else_flow = stmt
                    .else_branch
                    .as_ref()
                    .map(|block| self.check_block(block))
                    .unwrap_or_default();
                Flow {
                    returns: then_flow.returns && else_flow.returns,
                    ret: self.merge(then_flow.ret, else_flow.ret),
                }
            }
            Statement::While(stmt) => {
                self.check_test_expression(&stmt.condition);
                self.loop_depth += 1;
                let body = self.check_block(&stmt.body);
                self.loop_depth -= 1;
                Flow {
                    returns: false,
                    ret: body.ret,
                }
            }
            Statement::For(stmt) => {
                let scope = self.model.scope(stmt.id);
                if let Some(scope) = scope {
                    self.ctx.open(self.symbols, scope);
                }
                self.check_statement(&stmt.init);
                self.check_test_expression(&stmt.condition);
                self.check_statement(&stmt.update);
                self.loop_depth += 1;
                let body = self.check_statements(&stmt.body.statements);
                self.loop_depth -= 1;
                if scope.is_some() {
                    self.ctx.close(self.symbols);
                }
                Flow {
                    returns: false,
                    ret: body.ret,
                }
            }
            Statement::Break(span) => {
                if self.loop_depth == 0 {
                    self.diagnostics.push(SemanticError::BreakOutsideLoop { span: *span });
                }
                Flow::default()
            }
            Statement::Return(stmt) => self.check_return(stmt),
            Statement::Print(stmt) => {
                for (index, argument) in stmt.arguments.iter().enumerate() {
                    let ty = self.check_expression(argument);
                    if !self.types.has_error(ty) && !self.types.is_base_type(ty) {
                        self.diagnostics.push(SemanticError::InvalidPrintArgument {
                            index: index + 1,
                            ty: self.types.display(ty),
                            span: argument.span,
                        });
                    }
                }
                Flow::default()
            }
        }
    }

    /// Inside a lambda the return type is inferred rather than checked
    fn check_return(&mut self, stmt: &ReturnStatement) -> Flow {
        let actual = match &stmt.value {
            Some(value) => self.check_expression(value),
            None => TypeId::VOID,
        };

        if self.lambda_depth == 0 {
            let expected = self
                .ctx
                .current_method()
                .map_or(TypeId::ERROR, |m| self.return_type_of(m));
            if !self.types.has_error(actual) && !self.types.is_subtype(actual, expected) {
                self.diagnostics.push(SemanticError::IncompatibleReturn {
                    expected: self.types.display(expected),
                    found: self.types.display(actual),
                    span: stmt.span,
                });
            }
        }

        Flow {
            returns: true,
            ret: Some(actual),
        }
    }

    fn check_test_expression(&mut self, condition: &Expression) {
        let ty = self.check_expression(condition);
        if !self.types.eq(ty, TypeId::BOOL) {
            self.diagnostics
                .push(SemanticError::InvalidTestExpression { span: condition.span });
        }
    }

    fn check_local_var(&mut self, decl: &LocalVarDecl) {
        let Some(init) = &decl.init else {
            return;
        };
        let symbol = self.model.declaration(decl.id);

        // The variable being declared is not in scope inside its own initializer
        let saved = self.local_def_pos.replace(decl.name.span);
        let saved_defining = std::mem::replace(&mut self.defining, symbol.map(|s| (s, decl.name.span)));
        let rhs = self.check_expression(init);
        self.defining = saved_defining;
        self.local_def_pos = saved;

        let Some(symbol) = symbol else {
            return;
        };
        if decl.type_ann.is_some() {
            let lhs = self.symbols.symbol(symbol).ty;
            if !self.types.has_error(rhs) && !self.types.is_subtype(rhs, lhs) {
                self.diagnostics.push(SemanticError::IncompatibleAssignment {
                    left: self.types.display(lhs),
                    right: self.types.display(rhs),
                    span: decl.assign_span.unwrap_or(decl.span),
                });
            }
        } else {
            let ty = if self.types.is_void(rhs) {
                self.diagnostics.push(SemanticError::BadVariableType {
                    name: decl.name.name.clone(),
                    span: decl.name.span,
                });
                TypeId::ERROR
            } else {
                rhs
            };
            self.symbols.set_type(symbol, ty);
        }
    }

    fn check_assign(&mut self, assign: &AssignStatement) {
        let lhs = self.check_expression(&assign.target);
        let rhs = self.check_expression(&assign.value);

        match self.model.reference(assign.target.id) {
            Some(Reference::Method { symbol, .. }) => {
                self.diagnostics.push(SemanticError::AssignToMethod {
                    name: self.symbols.symbol(symbol).name.clone(),
                    span: assign.span,
                });
                return;
            }
            Some(Reference::Variable { symbol, .. }) => self.check_captured_assignment(symbol, assign.span),
            _ => {}
        }

        if !self.types.has_error(lhs) && !self.types.has_error(rhs) && !self.types.is_subtype(rhs, lhs) {
            self.diagnostics.push(SemanticError::IncompatibleAssignment {
                left: self.types.display(lhs),
                right: self.types.display(rhs),
                span: assign.span,
            });
        }
    }

    /// Inside a lambda, only variables declared within that lambda's own
    /// local scopes (and members) may be assigned
    fn check_captured_assignment(&mut self, variable: SymbolId, span: Span) {
        if self.lambda_depth == 0 {
            return;
        }
        let symbol = self.symbols.symbol(variable);
        if symbol.is_member_variable() {
            return;
        }

        let domain = symbol.domain;
        let mut scope = self.ctx.current_scope();
        while scope != domain && self.symbols.scope(scope).kind == ScopeKind::Local {
            match self.symbols.scope(scope).parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
        if scope != domain {
            self.diagnostics.push(SemanticError::CapturedVariableAssignment {
                name: symbol.name.clone(),
                span,
            });
        }
    }

    // ---- expressions ----

    /// Type an expression and record the result
    pub(crate) fn check_expression(&mut self, expr: &Expression) -> TypeId {
        self.check_expression_as(expr, false, false)
    }

    fn check_expression_as(&mut self, expr: &Expression, allow_class_name: bool, as_callee: bool) -> TypeId {
        let ty = match &expr.kind {
            ExpressionKind::IntLiteral(_) | ExpressionKind::ReadInteger => TypeId::INT,
            ExpressionKind::BoolLiteral(_) => TypeId::BOOL,
            ExpressionKind::StringLiteral(_) | ExpressionKind::ReadLine => TypeId::STRING,
            ExpressionKind::Null => TypeId::NULL,
            ExpressionKind::This => self.check_this(expr),
            ExpressionKind::Variable(select) => match &select.receiver {
                None => self.check_name(expr, &select.name, allow_class_name),
                Some(receiver) => self.check_member(expr, receiver, &select.name, as_callee),
            },
            ExpressionKind::Index(index) => self.check_index(index),
            ExpressionKind::Call(call) => self.check_call(expr, call),
            ExpressionKind::Unary(unary) => self.check_unary(expr, unary),
            ExpressionKind::Binary(binary) => self.check_binary(expr, binary),
            ExpressionKind::NewClass(new_class) => self.check_new_class(expr, new_class),
            ExpressionKind::NewArray(new_array) => self.check_new_array(new_array),
            ExpressionKind::InstanceOf(test) => {
                self.check_class_test(expr, test);
                TypeId::BOOL
            }
            ExpressionKind::Cast(test) => self.check_class_test(expr, test),
            ExpressionKind::Lambda(lambda) => self.check_lambda(expr, lambda),
        };
        self.model.set_type(expr.id, ty);
        ty
    }

    fn in_static_method(&self) -> bool {
        self.ctx
            .current_method()
            .and_then(|m| self.symbols.symbol(m).as_method())
            .is_some_and(|m| m.is_static)
    }

    fn current_method_name(&self) -> String {
        self.ctx
            .current_method()
            .map(|m| self.symbols.symbol(m).name.clone())
            .unwrap_or_default()
    }

    fn current_class_type(&self) -> TypeId {
        self.ctx
            .current_class()
            .map_or(TypeId::ERROR, |c| self.symbols.symbol(c).ty)
    }

    fn check_this(&mut self, expr: &Expression) -> TypeId {
        if self.in_static_method() {
            self.diagnostics
                .push(SemanticError::ThisInStaticMethod { span: expr.span });
            return TypeId::ERROR;
        }
        if let Some(this) = self.ctx.lookup(self.symbols, "this") {
            self.model.set_reference(expr.id, Reference::This(this));
            self.capture(this);
        }
        self.current_class_type()
    }

    /// A bare name: variable, method, closure or (as a receiver) class
    fn check_name(&mut self, expr: &Expression, name: &Identifier, allow_class_name: bool) -> TypeId {
        let pos = self.local_def_pos.unwrap_or(name.span);
        let mut found = self.ctx.lookup_before(self.symbols, &name.name, pos);
        // Inside a lambda the declaration position is reset, so the local
        // being initialized has to be skipped explicitly
        if let Some((defining, at)) = self.defining {
            if found == Some(defining) {
                found = self.ctx.lookup_before(self.symbols, &name.name, at);
            }
        }
        let found = found.map(|s| (s, self.symbols.symbol(s).kind, self.symbols.symbol(s).ty));

        match found {
            Some((symbol, SymbolKind::Variable(var), ty)) => {
                let mut implicit_this = false;
                if var.is_member {
                    if self.in_static_method() {
                        self.report_non_static(name);
                    } else {
                        implicit_this = true;
                        self.capture_this();
                    }
                } else {
                    self.capture(symbol);
                }
                self.model
                    .set_reference(expr.id, Reference::Variable { symbol, implicit_this });
                ty
            }
            Some((symbol, SymbolKind::Class(_), ty)) if allow_class_name => {
                self.model.set_reference(expr.id, Reference::ClassName(symbol));
                ty
            }
            Some((symbol, SymbolKind::Method(method), ty)) => {
                if !method.is_static {
                    if self.in_static_method() {
                        self.report_non_static(name);
                    } else {
                        self.capture_this();
                    }
                }
                self.model.set_reference(
                    expr.id,
                    Reference::Method {
                        symbol,
                        static_access: method.is_static,
                        implicit_this: !method.is_static,
                    },
                );
                ty
            }
            // Closure symbols are named after their position and never match
            Some((_, SymbolKind::Class(_) | SymbolKind::Closure(_), _)) | None => {
                self.diagnostics.push(SemanticError::UndeclaredVariable {
                    name: name.name.clone(),
                    span: name.span,
                });
                TypeId::ERROR
            }
        }
    }

    fn report_non_static(&mut self, name: &Identifier) {
        self.diagnostics.push(SemanticError::NonStaticReference {
            method: self.current_method_name(),
            name: name.name.clone(),
            span: name.span,
        });
    }

    /// `receiver.name`
    fn check_member(&mut self, expr: &Expression, receiver: &Expression, name: &Identifier, as_callee: bool) -> TypeId {
        let bare = matches!(&receiver.kind, ExpressionKind::Variable(select) if select.receiver.is_none());
        let receiver_ty = self.check_expression_as(receiver, bare, false);

        if let Some(Reference::ClassName(class)) = self.model.reference(receiver.id) {
            return self.check_static_member(expr, class, name, as_callee);
        }
        if self.types.has_error(receiver_ty) {
            return TypeId::ERROR;
        }

        if self.types.is_array(receiver_ty) && name.name == "length" {
            self.model.set_reference(expr.id, Reference::ArrayLength);
            return self
                .types
                .function_type(Vec::new(), TypeId::INT)
                .unwrap_or(TypeId::ERROR);
        }

        let class_scope = self
            .types
            .class(receiver_ty)
            .and_then(|c| self.ctx.lookup_class(self.symbols, &c.name))
            .and_then(|c| self.symbols.symbol(c).as_class().map(|info| info.scope));
        let Some(class_scope) = class_scope else {
            self.diagnostics.push(SemanticError::NotAClassField {
                name: name.name.clone(),
                ty: self.types.display(receiver_ty),
                span: expr.span,
            });
            return TypeId::ERROR;
        };

        let Some(member) = self.symbols.lookup_chain(class_scope, &name.name) else {
            self.diagnostics.push(SemanticError::FieldNotFound {
                name: name.name.clone(),
                ty: self.types.display(receiver_ty),
                span: expr.span,
            });
            return TypeId::ERROR;
        };

        let symbol = self.symbols.symbol(member);
        let (kind, ty, domain) = (symbol.kind, symbol.ty, symbol.domain);
        match kind {
            SymbolKind::Variable(var) if var.is_member => {
                self.model.set_reference(
                    expr.id,
                    Reference::Variable {
                        symbol: member,
                        implicit_this: false,
                    },
                );
                // Member variables are protected: visible from the declaring
                // class and its subclasses only
                let owner_ty = self
                    .symbols
                    .scope(domain)
                    .owner
                    .map_or(TypeId::ERROR, |owner| self.symbols.symbol(owner).ty);
                let current = self.current_class_type();
                if !self.types.is_subtype(current, owner_ty) {
                    self.diagnostics.push(SemanticError::NotAccessible {
                        name: name.name.clone(),
                        ty: self.types.display(receiver_ty),
                        span: expr.span,
                    });
                }
                ty
            }
            SymbolKind::Method(method) => {
                self.model.set_reference(
                    expr.id,
                    Reference::Method {
                        symbol: member,
                        static_access: method.is_static,
                        implicit_this: false,
                    },
                );
                ty
            }
            _ => {
                self.diagnostics.push(SemanticError::NotAClassField {
                    name: name.name.clone(),
                    ty: self.types.display(receiver_ty),
                    span: expr.span,
                });
                TypeId::ERROR
            }
        }
    }

    /// `ClassName.name`: only static methods are reachable
    fn check_static_member(&mut self, expr: &Expression, class: SymbolId, name: &Identifier, as_callee: bool) -> TypeId {
        let class_symbol = self.symbols.symbol(class);
        let class_ty = class_symbol.ty;
        let Some(scope) = class_symbol.as_class().map(|c| c.scope) else {
            return TypeId::ERROR;
        };

        let Some(member) = self.symbols.lookup_chain(scope, &name.name) else {
            self.diagnostics.push(SemanticError::FieldNotFound {
                name: name.name.clone(),
                ty: self.types.display(class_ty),
                span: expr.span,
            });
            return TypeId::ERROR;
        };

        let symbol = self.symbols.symbol(member);
        match symbol.kind {
            SymbolKind::Method(method) if method.is_static => {
                let ty = symbol.ty;
                self.model.set_reference(
                    expr.id,
                    Reference::Method {
                        symbol: member,
                        static_access: true,
                        implicit_this: false,
                    },
                );
                ty
            }
            SymbolKind::Variable(_) if as_callee => {
                self.diagnostics.push(SemanticError::NotAClassMethod {
                    name: name.name.clone(),
                    ty: self.types.display(class_ty),
                    span: expr.span,
                });
                TypeId::ERROR
            }
            _ => {
                self.diagnostics.push(SemanticError::NotAClassField {
                    name: name.name.clone(),
                    ty: self.types.display(class_ty),
                    span: expr.span,
                });
                TypeId::ERROR
            }
        }
    }

    fn check_index(&mut self, index: &IndexExpression) -> TypeId {
        let array_ty = self.check_expression(&index.array);
        let index_ty = self.check_expression(&index.index);

        if self.types.has_error(array_ty) {
            return TypeId::ERROR;
        }
        let Some(element) = self.types.element_type(array_ty) else {
            self.diagnostics
                .push(SemanticError::NotAnArray { span: index.array.span });
            return TypeId::ERROR;
        };
        if !self.types.eq(index_ty, TypeId::INT) {
            self.diagnostics
                .push(SemanticError::IndexNotInt { span: index.index.span });
        }
        element
    }

    fn check_call(&mut self, expr: &Expression, call: &CallExpression) -> TypeId {
        let callee_ty = self.check_expression_as(&call.callee, false, true);
        let argument_types: Vec<TypeId> = call
            .arguments
            .iter()
            .map(|argument| self.check_expression(argument))
            .collect();

        if self.types.has_error(callee_ty) {
            return TypeId::ERROR;
        }
        let Some(signature) = self.types.function(callee_ty).cloned() else {
            self.diagnostics.push(SemanticError::NotCallable {
                ty: self.types.display(callee_ty),
                span: expr.span,
            });
            return TypeId::ERROR;
        };

        if signature.arity() != call.arguments.len() {
            let name = match &call.callee.kind {
                ExpressionKind::Variable(select) => Some(select.name.name.clone()),
                _ => None,
            };
            self.diagnostics.push(SemanticError::ArityMismatch {
                name,
                expected: signature.arity(),
                found: call.arguments.len(),
                span: expr.span,
            });
        }

        let arguments = call.arguments.iter().zip(argument_types);
        for (index, (&param, (argument, arg_ty))) in signature.params.iter().zip(arguments).enumerate() {
            if !self.types.has_error(arg_ty) && !self.types.is_subtype(arg_ty, param) {
                self.diagnostics.push(SemanticError::ArgumentTypeMismatch {
                    index: index + 1,
                    expected: self.types.display(param),
                    found: self.types.display(arg_ty),
                    span: argument.span,
                });
            }
        }
        signature.return_type
    }

    fn check_unary(&mut self, expr: &Expression, unary: &UnaryExpression) -> TypeId {
        let operand = self.check_expression(&unary.operand);
        let expected = match unary.operator {
            UnaryOperator::Negate => TypeId::INT,
            UnaryOperator::Not => TypeId::BOOL,
        };
        if !self.types.eq(operand, expected) {
            self.diagnostics.push(SemanticError::IncompatibleUnaryOp {
                op: unary.operator.to_string(),
                operand: self.types.display(operand),
                span: expr.span,
            });
        }
        expected
    }

    fn check_binary(&mut self, expr: &Expression, binary: &BinaryExpression) -> TypeId {
        let left = self.check_expression(&binary.left);
        let right = self.check_expression(&binary.right);
        let op = binary.operator;

        let compatible = if op.is_arithmetic() || !(op.is_logical() || op.is_equality()) {
            self.types.eq(left, TypeId::INT) && self.types.eq(right, TypeId::INT)
        } else if op.is_logical() {
            self.types.eq(left, TypeId::BOOL) && self.types.eq(right, TypeId::BOOL)
        } else {
            self.types.is_subtype(left, right) || self.types.is_subtype(right, left)
        };

        if !compatible && !self.types.has_error(left) && !self.types.has_error(right) {
            self.diagnostics.push(SemanticError::IncompatibleBinaryOp {
                left: self.types.display(left),
                op: op.to_string(),
                right: self.types.display(right),
                span: expr.span,
            });
        }

        if op.is_arithmetic() {
            TypeId::INT
        } else {
            TypeId::BOOL
        }
    }

    fn check_new_class(&mut self, expr: &Expression, new_class: &NewClassExpression) -> TypeId {
        let name = &new_class.class;
        let Some(class) = self.ctx.lookup_class(self.symbols, &name.name) else {
            self.diagnostics.push(SemanticError::ClassNotFound {
                name: name.name.clone(),
                span: name.span,
            });
            return TypeId::ERROR;
        };

        self.model.set_reference(expr.id, Reference::Class(class));
        let symbol = self.symbols.symbol(class);
        if symbol.as_class().is_some_and(|c| c.is_abstract) {
            self.diagnostics.push(SemanticError::AbstractInstantiation {
                class: name.name.clone(),
                span: expr.span,
            });
            return TypeId::ERROR;
        }
        symbol.ty
    }

    fn check_new_array(&mut self, new_array: &NewArrayExpression) -> TypeId {
        let element = resolve_type_annotation(self.types, self.symbols, &mut self.diagnostics, &new_array.element);
        let length = self.check_expression(&new_array.length);

        let ty = if self.types.is_void(element) {
            self.diagnostics.push(SemanticError::BadArrayElementType {
                span: new_array.element.span,
            });
            TypeId::ERROR
        } else if self.types.has_error(element) {
            TypeId::ERROR
        } else {
            self.types.array_type(element).unwrap_or(TypeId::ERROR)
        };

        if !self.types.eq(length, TypeId::INT) {
            self.diagnostics
                .push(SemanticError::BadArrayLength { span: new_array.length.span });
        }
        ty
    }

    /// `instanceof` and casts; returns the named class type
    fn check_class_test(&mut self, expr: &Expression, test: &ClassTestExpression) -> TypeId {
        let object = self.check_expression(&test.object);
        if !self.types.has_error(object) && !self.types.is_class(object) {
            self.diagnostics.push(SemanticError::NotAClass {
                ty: self.types.display(object),
                span: expr.span,
            });
        }

        match self.ctx.lookup_class(self.symbols, &test.class.name) {
            Some(class) => {
                self.model.set_reference(expr.id, Reference::Class(class));
                self.symbols.symbol(class).ty
            }
            None => {
                self.diagnostics.push(SemanticError::ClassNotFound {
                    name: test.class.name.clone(),
                    span: test.class.span,
                });
                TypeId::ERROR
            }
        }
    }

    fn check_lambda(&mut self, expr: &Expression, lambda: &LambdaExpression) -> TypeId {
        let Some(scope) = self.model.scope(expr.id) else {
            return TypeId::ERROR;
        };

        let saved_loop_depth = std::mem::take(&mut self.loop_depth);
        let saved_def_pos = self.local_def_pos.take();
        self.lambda_depth += 1;
        self.ctx.open(self.symbols, scope);

        let mut broken = false;
        let mut params = Vec::with_capacity(lambda.params.len());
        for param in &lambda.params {
            let ty = self
                .model
                .declaration(param.id)
                .map_or(TypeId::ERROR, |p| self.symbols.symbol(p).ty);
            broken |= self.types.has_error(ty);
            params.push(ty);
        }

        let ret = match &lambda.body {
            LambdaBody::Block(block) => {
                let flow = self.check_block(block);
                let ret = flow.ret.unwrap_or(TypeId::VOID);
                if self.types.is_conflict(ret) {
                    self.diagnostics
                        .push(SemanticError::ConflictingReturnTypes { span: block.span });
                } else if !self.types.is_void(ret) && !flow.returns {
                    self.diagnostics
                        .push(SemanticError::MissingReturn { span: block.span });
                }
                ret
            }
            LambdaBody::Expression(body) => {
                let local = self.model.scope(body.id);
                if let Some(local) = local {
                    self.ctx.open(self.symbols, local);
                }
                let ty = self.check_expression(body);
                if local.is_some() {
                    self.ctx.close(self.symbols);
                }
                ty
            }
        };

        self.ctx.close(self.symbols);
        self.lambda_depth -= 1;
        self.local_def_pos = saved_def_pos;
        self.loop_depth = saved_loop_depth;

        if broken || self.types.has_error(ret) || self.types.is_conflict(ret) {
            return TypeId::ERROR;
        }
        let ty = self.types.function_type(params, ret).unwrap_or(TypeId::ERROR);
        if let Some(closure) = self.model.declaration(expr.id) {
            self.symbols.set_type(closure, ty);
        }
        ty
    }

    // ---- captures ----

    /// Record `symbol` as captured by every lambda between the current
    /// position and the scope that declares it
    fn capture(&mut self, symbol: SymbolId) {
        if self.lambda_depth == 0 {
            return;
        }
        let domain = self.symbols.symbol(symbol).domain;
        let crossed: Vec<_> = self
            .ctx
            .open_scopes()
            .take_while(|&scope| scope != domain)
            .filter(|&scope| self.symbols.scope(scope).kind == ScopeKind::Lambda)
            .collect();
        for lambda in crossed {
            self.symbols.add_capture(lambda, symbol);
        }
    }

    fn capture_this(&mut self) {
        if self.lambda_depth == 0 {
            return;
        }
        if let Some(this) = self.ctx.lookup(self.symbols, "this") {
            self.capture(this);
        }
    }
}
