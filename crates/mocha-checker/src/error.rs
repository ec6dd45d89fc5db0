//! Semantic errors reported by the Namer and Typer passes
//!
//! Errors are collected into [`Diagnostics`] instead of being returned, so a
//! single run reports as many problems as possible.

use mocha_parser::Span;
use thiserror::Error;

/// A problem found during name resolution or type checking
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SemanticError {
    // ========================================================================
    // Namer
    // ========================================================================
    /// Name declared twice in one scope, or clashing with an outer declaration
    #[error("declaration of '{name}' here conflicts with earlier declaration at {earlier}")]
    DeclarationConflict {
        /// Declared name
        name: String,
        /// Earlier declaration
        earlier: Span,
        /// Offending declaration
        span: Span,
    },

    /// Reference to an undefined class
    #[error("class '{name}' not found")]
    ClassNotFound {
        /// Class name
        name: String,
        /// Reference location
        span: Span,
    },

    /// Inheritance chain loops back on itself
    #[error("illegal class inheritance (should be acyclic)")]
    CyclicInheritance {
        /// Class whose `extends` closes the cycle
        name: String,
        /// Location of that class
        span: Span,
    },

    /// Same-name method in an ancestor with an incompatible signature
    #[error("overriding method '{name}' doesn't match the type signature in class '{parent}'")]
    OverrideIncompatible {
        /// Method name
        name: String,
        /// Class declaring the overridden method
        parent: String,
        /// Offending method
        span: Span,
    },

    /// Concrete class leaves inherited abstract methods unimplemented
    #[error("'{class}' is not abstract and does not override all abstract methods")]
    MissingAbstractOverride {
        /// Class name
        class: String,
        /// Unimplemented method names
        methods: Vec<String>,
        /// Class location
        span: Span,
    },

    /// Member variable redeclares an inherited member variable
    #[error("overriding variable is not allowed for var '{name}'")]
    OverridingVariable {
        /// Variable name
        name: String,
        /// Offending declaration
        span: Span,
    },

    /// Variable declared with type void
    #[error("cannot declare identifier '{name}' as void type")]
    BadVariableType {
        /// Variable name
        name: String,
        /// Declaration location
        span: Span,
    },

    /// Array of void
    #[error("array element type must be non-void known type")]
    BadArrayElementType {
        /// Element type location
        span: Span,
    },

    /// Function type literal with a void parameter
    #[error("arguments in function type must be non-void known type")]
    BadFunctionTypeArgument {
        /// Parameter type location
        span: Span,
    },

    /// No usable entry method
    #[error("no legal {class}.{method} function is found")]
    MissingEntryPoint {
        /// Expected class
        class: String,
        /// Expected method
        method: String,
        /// Program location
        span: Span,
    },

    // ========================================================================
    // Typer
    // ========================================================================
    /// `new` on an abstract class
    #[error("cannot instantiate abstract class '{class}'")]
    AbstractInstantiation {
        /// Class name
        class: String,
        /// Expression location
        span: Span,
    },

    /// Name resolves to nothing
    #[error("undeclared variable '{name}'")]
    UndeclaredVariable {
        /// Name
        name: String,
        /// Reference location
        span: Span,
    },

    /// Member variable read from outside its class hierarchy
    #[error("field '{name}' of '{ty}' not accessible here")]
    NotAccessible {
        /// Field name
        name: String,
        /// Receiver type
        ty: String,
        /// Access location
        span: Span,
    },

    /// Selection that is not a reachable field
    #[error("cannot access field '{name}' from '{ty}'")]
    NotAClassField {
        /// Member name
        name: String,
        /// Receiver type
        ty: String,
        /// Access location
        span: Span,
    },

    /// Call through a class name to something that is not a method
    #[error("cannot call '{name}' from '{ty}': not a method")]
    NotAClassMethod {
        /// Member name
        name: String,
        /// Receiver type
        ty: String,
        /// Access location
        span: Span,
    },

    /// Call of a non-function value
    #[error("{ty} is not a callable type")]
    NotCallable {
        /// Callee type
        ty: String,
        /// Call location
        span: Span,
    },

    /// Wrong number of call arguments
    #[error("{} expects {expected} argument(s) but {found} given", callee_label(.name))]
    ArityMismatch {
        /// Method name, or `None` for a closure value
        name: Option<String>,
        /// Parameter count
        expected: usize,
        /// Argument count
        found: usize,
        /// Call location
        span: Span,
    },

    /// Argument not a subtype of its parameter
    #[error("incompatible argument {index}: {found} given, {expected} expected")]
    ArgumentTypeMismatch {
        /// 1-based argument position
        index: usize,
        /// Parameter type
        expected: String,
        /// Argument type
        found: String,
        /// Argument location
        span: Span,
    },

    /// Right-hand side not a subtype of the left
    #[error("incompatible operands: {left} = {right}")]
    IncompatibleAssignment {
        /// Target type
        left: String,
        /// Value type
        right: String,
        /// Assignment location
        span: Span,
    },

    /// Returned value not a subtype of the declared return type
    #[error("incompatible return: {found} given, {expected} expected")]
    IncompatibleReturn {
        /// Declared return type
        expected: String,
        /// Returned type
        found: String,
        /// Return location
        span: Span,
    },

    /// Non-void body with a path that does not return
    #[error("missing return statement: control reaches end of non-void block")]
    MissingReturn {
        /// Body location
        span: Span,
    },

    /// `break` with no enclosing loop
    #[error("'break' is only allowed inside a loop")]
    BreakOutsideLoop {
        /// Statement location
        span: Span,
    },

    /// Condition that is not bool
    #[error("test expression must have bool type")]
    InvalidTestExpression {
        /// Condition location
        span: Span,
    },

    /// `Print` argument of non-base type
    #[error("incompatible argument {index}: {ty} given, int/bool/string expected")]
    InvalidPrintArgument {
        /// 1-based argument position
        index: usize,
        /// Argument type
        ty: String,
        /// Argument location
        span: Span,
    },

    /// Closure assigns to a variable it captured
    #[error("cannot assign value to captured variable '{name}' in lambda expression")]
    CapturedVariableAssignment {
        /// Variable name
        name: String,
        /// Assignment location
        span: Span,
    },

    /// `new T[n]` with non-int length
    #[error("new array length must be an integer")]
    BadArrayLength {
        /// Length location
        span: Span,
    },

    /// `this` in a static method
    #[error("can not use this in static function")]
    ThisInStaticMethod {
        /// Expression location
        span: Span,
    },

    /// Instance member named from a static method
    #[error("can not reference a non-static field '{name}' from static method '{method}'")]
    NonStaticReference {
        /// Enclosing static method
        method: String,
        /// Member name
        name: String,
        /// Reference location
        span: Span,
    },

    /// Selected member does not exist
    #[error("field '{name}' not found in '{ty}'")]
    FieldNotFound {
        /// Member name
        name: String,
        /// Receiver type
        ty: String,
        /// Access location
        span: Span,
    },

    /// Indexing a non-array
    #[error("array subscript on non-array expression")]
    NotAnArray {
        /// Indexed expression location
        span: Span,
    },

    /// Array index that is not int
    #[error("array subscript must be an integer")]
    IndexNotInt {
        /// Index expression location
        span: Span,
    },

    /// Unary operator applied to the wrong type
    #[error("incompatible operand: {op} {operand}")]
    IncompatibleUnaryOp {
        /// Operator
        op: String,
        /// Operand type
        operand: String,
        /// Expression location
        span: Span,
    },

    /// Binary operator applied to the wrong types
    #[error("incompatible operands: {left} {op} {right}")]
    IncompatibleBinaryOp {
        /// Left operand type
        left: String,
        /// Operator
        op: String,
        /// Right operand type
        right: String,
        /// Expression location
        span: Span,
    },

    /// Method name used as an assignment target
    #[error("cannot assign value to class member method '{name}'")]
    AssignToMethod {
        /// Method name
        name: String,
        /// Assignment location
        span: Span,
    },

    /// `instanceof` or cast of a non-class value
    #[error("{ty} is not a class type")]
    NotAClass {
        /// Operand type
        ty: String,
        /// Expression location
        span: Span,
    },

    /// Closure returns values whose types have no common supertype
    #[error("incompatible return types in blocked expression")]
    ConflictingReturnTypes {
        /// Body location
        span: Span,
    },
}

fn callee_label(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("function '{}'", name),
        None => "lambda expression".to_string(),
    }
}

/// Discriminant of [`SemanticError`], for matching without payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum ErrorKind {
    DeclarationConflict,
    ClassNotFound,
    CyclicInheritance,
    OverrideIncompatible,
    MissingAbstractOverride,
    OverridingVariable,
    BadVariableType,
    BadArrayElementType,
    BadFunctionTypeArgument,
    MissingEntryPoint,
    AbstractInstantiation,
    UndeclaredVariable,
    NotAccessible,
    NotAClassField,
    NotAClassMethod,
    NotCallable,
    ArityMismatch,
    ArgumentTypeMismatch,
    IncompatibleAssignment,
    IncompatibleReturn,
    MissingReturn,
    BreakOutsideLoop,
    InvalidTestExpression,
    InvalidPrintArgument,
    CapturedVariableAssignment,
    BadArrayLength,
    ThisInStaticMethod,
    NonStaticReference,
    FieldNotFound,
    NotAnArray,
    IndexNotInt,
    IncompatibleUnaryOp,
    IncompatibleBinaryOp,
    AssignToMethod,
    NotAClass,
    ConflictingReturnTypes,
}

impl ErrorKind {
    /// Stable diagnostic code: `E1xxx` for the Namer, `E2xxx` for the Typer
    pub fn code(self) -> &'static str {
        use ErrorKind::*;

        match self {
            DeclarationConflict => "E1001",
            ClassNotFound => "E1002",
            CyclicInheritance => "E1003",
            OverrideIncompatible => "E1004",
            MissingAbstractOverride => "E1005",
            OverridingVariable => "E1006",
            BadVariableType => "E1007",
            BadArrayElementType => "E1008",
            BadFunctionTypeArgument => "E1009",
            MissingEntryPoint => "E1010",
            AbstractInstantiation => "E2001",
            UndeclaredVariable => "E2002",
            NotAccessible => "E2003",
            NotAClassField => "E2004",
            NotAClassMethod => "E2005",
            NotCallable => "E2006",
            ArityMismatch => "E2007",
            ArgumentTypeMismatch => "E2008",
            IncompatibleAssignment => "E2009",
            IncompatibleReturn => "E2010",
            MissingReturn => "E2011",
            BreakOutsideLoop => "E2012",
            InvalidTestExpression => "E2013",
            InvalidPrintArgument => "E2014",
            CapturedVariableAssignment => "E2015",
            BadArrayLength => "E2016",
            ThisInStaticMethod => "E2017",
            NonStaticReference => "E2018",
            FieldNotFound => "E2019",
            NotAnArray => "E2020",
            IndexNotInt => "E2021",
            IncompatibleUnaryOp => "E2022",
            IncompatibleBinaryOp => "E2023",
            AssignToMethod => "E2024",
            NotAClass => "E2025",
            ConflictingReturnTypes => "E2026",
        }
    }
}

impl SemanticError {
    /// Primary location of the error
    pub fn span(&self) -> Span {
        use SemanticError::*;

        match self {
            DeclarationConflict { span, .. }
            | ClassNotFound { span, .. }
            | CyclicInheritance { span, .. }
            | OverrideIncompatible { span, .. }
            | MissingAbstractOverride { span, .. }
            | OverridingVariable { span, .. }
            | BadVariableType { span, .. }
            | BadArrayElementType { span }
            | BadFunctionTypeArgument { span }
            | MissingEntryPoint { span, .. }
            | AbstractInstantiation { span, .. }
            | UndeclaredVariable { span, .. }
            | NotAccessible { span, .. }
            | NotAClassField { span, .. }
            | NotAClassMethod { span, .. }
            | NotCallable { span, .. }
            | ArityMismatch { span, .. }
            | ArgumentTypeMismatch { span, .. }
            | IncompatibleAssignment { span, .. }
            | IncompatibleReturn { span, .. }
            | MissingReturn { span }
            | BreakOutsideLoop { span }
            | InvalidTestExpression { span }
            | InvalidPrintArgument { span, .. }
            | CapturedVariableAssignment { span, .. }
            | BadArrayLength { span }
            | ThisInStaticMethod { span }
            | NonStaticReference { span, .. }
            | FieldNotFound { span, .. }
            | NotAnArray { span }
            | IndexNotInt { span }
            | IncompatibleUnaryOp { span, .. }
            | IncompatibleBinaryOp { span, .. }
            | AssignToMethod { span, .. }
            | NotAClass { span, .. }
            | ConflictingReturnTypes { span } => *span,
        }
    }

    /// Payload-free kind of the error
    pub fn kind(&self) -> ErrorKind {
        use SemanticError as E;

        match self {
            E::DeclarationConflict { .. } => ErrorKind::DeclarationConflict,
            E::ClassNotFound { .. } => ErrorKind::ClassNotFound,
            E::CyclicInheritance { .. } => ErrorKind::CyclicInheritance,
            E::OverrideIncompatible { .. } => ErrorKind::OverrideIncompatible,
            E::MissingAbstractOverride { .. } => ErrorKind::MissingAbstractOverride,
            E::OverridingVariable { .. } => ErrorKind::OverridingVariable,
            E::BadVariableType { .. } => ErrorKind::BadVariableType,
            E::BadArrayElementType { .. } => ErrorKind::BadArrayElementType,
            E::BadFunctionTypeArgument { .. } => ErrorKind::BadFunctionTypeArgument,
            E::MissingEntryPoint { .. } => ErrorKind::MissingEntryPoint,
            E::AbstractInstantiation { .. } => ErrorKind::AbstractInstantiation,
            E::UndeclaredVariable { .. } => ErrorKind::UndeclaredVariable,
            E::NotAccessible { .. } => ErrorKind::NotAccessible,
            E::NotAClassField { .. } => ErrorKind::NotAClassField,
            E::NotAClassMethod { .. } => ErrorKind::NotAClassMethod,
            E::NotCallable { .. } => ErrorKind::NotCallable,
            E::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            E::ArgumentTypeMismatch { .. } => ErrorKind::ArgumentTypeMismatch,
            E::IncompatibleAssignment { .. } => ErrorKind::IncompatibleAssignment,
            E::IncompatibleReturn { .. } => ErrorKind::IncompatibleReturn,
            E::MissingReturn { .. } => ErrorKind::MissingReturn,
            E::BreakOutsideLoop { .. } => ErrorKind::BreakOutsideLoop,
            E::InvalidTestExpression { .. } => ErrorKind::InvalidTestExpression,
            E::InvalidPrintArgument { .. } => ErrorKind::InvalidPrintArgument,
            E::CapturedVariableAssignment { .. } => ErrorKind::CapturedVariableAssignment,
            E::BadArrayLength { .. } => ErrorKind::BadArrayLength,
            E::ThisInStaticMethod { .. } => ErrorKind::ThisInStaticMethod,
            E::NonStaticReference { .. } => ErrorKind::NonStaticReference,
            E::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            E::NotAnArray { .. } => ErrorKind::NotAnArray,
            E::IndexNotInt { .. } => ErrorKind::IndexNotInt,
            E::IncompatibleUnaryOp { .. } => ErrorKind::IncompatibleUnaryOp,
            E::IncompatibleBinaryOp { .. } => ErrorKind::IncompatibleBinaryOp,
            E::AssignToMethod { .. } => ErrorKind::AssignToMethod,
            E::NotAClass { .. } => ErrorKind::NotAClass,
            E::ConflictingReturnTypes { .. } => ErrorKind::ConflictingReturnTypes,
        }
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Ordered collection of errors raised by a pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<SemanticError>,
}

impl Diagnostics {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn push(&mut self, error: SemanticError) {
        tracing::trace!(code = error.code(), span = %error.span(), "{}", error);
        self.errors.push(error);
    }

    /// Append every error of another collection
    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
    }

    /// Whether any error was raised
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are no errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors in the order they were raised
    pub fn iter(&self) -> impl Iterator<Item = &SemanticError> {
        self.errors.iter()
    }

    /// Number of errors of one kind
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }

    /// Errors sorted by source position, the order they are shown to users
    pub fn sorted(&self) -> Vec<&SemanticError> {
        let mut errors: Vec<&SemanticError> = self.errors.iter().collect();
        errors.sort_by_key(|e| e.span());
        errors
    }

    /// Take the errors
    pub fn into_vec(self) -> Vec<SemanticError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a SemanticError;
    type IntoIter = std::slice::Iter<'a, SemanticError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize) -> Span {
        Span::new(start, start + 1, 1, start as u32 + 1)
    }

    #[test]
    fn test_kind_and_code() {
        let err = SemanticError::CyclicInheritance { name: "A".to_string(), span: span(0) };
        assert_eq!(err.kind(), ErrorKind::CyclicInheritance);
        assert_eq!(err.code(), "E1003");

        let err = SemanticError::MissingReturn { span: span(3) };
        assert_eq!(err.code(), "E2011");
        assert_eq!(err.span(), span(3));
    }

    #[test]
    fn test_messages_carry_payload() {
        let err = SemanticError::IncompatibleAssignment {
            left: "int".to_string(),
            right: "bool".to_string(),
            span: span(0),
        };
        assert_eq!(err.to_string(), "incompatible operands: int = bool");

        let err = SemanticError::ArityMismatch { name: None, expected: 1, found: 2, span: span(0) };
        assert_eq!(err.to_string(), "lambda expression expects 1 argument(s) but 2 given");
    }

    #[test]
    fn test_diagnostics_collection() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_errors());
        diags.push(SemanticError::MissingReturn { span: span(9) });
        diags.push(SemanticError::BreakOutsideLoop { span: span(2) });
        diags.push(SemanticError::MissingReturn { span: span(5) });

        assert_eq!(diags.len(), 3);
        assert_eq!(diags.count(ErrorKind::MissingReturn), 2);
        let sorted: Vec<Span> = diags.sorted().iter().map(|e| e.span()).collect();
        assert_eq!(sorted, vec![span(2), span(5), span(9)]);
    }
}
