//! Diagnostic rendering
//!
//! Turns [`SemanticError`]s and [`ParseError`]s into codespan diagnostics with
//! source context, for terminal output or JSON.

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, LabelStyle, Severity};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use mocha_parser::{ParseError, ParseErrorKind, Span};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ErrorKind, SemanticError};

/// Error code for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    /// The code text, e.g. "E2001"
    pub fn as_str(&self) -> &str {
        self.0
    }
}

/// A diagnostic message with source code context
pub struct Diagnostic {
    inner: CsDiagnostic<usize>,
    code: Option<ErrorCode>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            inner: CsDiagnostic::new(severity).with_message(message),
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self.inner = self.inner.with_code(code.0);
        self
    }

    /// Add a primary label (main error location)
    pub fn with_primary_label(mut self, file_id: usize, span: Span, message: impl Into<String>) -> Self {
        let label = Label::primary(file_id, span.start..span.end).with_message(message);
        self.inner.labels.push(label);
        self
    }

    /// Add a secondary label (related location)
    pub fn with_secondary_label(mut self, file_id: usize, span: Span, message: impl Into<String>) -> Self {
        let label = Label::secondary(file_id, span.start..span.end).with_message(message);
        self.inner.labels.push(label);
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create diagnostic from a SemanticError
    pub fn from_semantic_error(error: &SemanticError, file_id: usize) -> Self {
        use SemanticError::*;

        let diag = Diagnostic::error(error.to_string()).with_code(ErrorCode(error.code()));
        match error {
            DeclarationConflict { earlier, span, .. } => diag
                .with_primary_label(file_id, *span, "declared again here")
                .with_secondary_label(file_id, *earlier, "first declaration here"),

            MissingAbstractOverride { methods, span, .. } => diag
                .with_primary_label(file_id, *span, "class is not abstract")
                .with_note(format!("unimplemented: {}", methods.join(", ")))
                .with_help("implement the methods or declare the class abstract"),

            OverrideIncompatible { parent, span, .. } => diag
                .with_primary_label(file_id, *span, "incompatible override")
                .with_note(format!("parameters may widen and the return type may narrow relative to '{}'", parent)),

            IncompatibleAssignment { left, right, span } => {
                diag.with_primary_label(file_id, *span, format!("expected '{}', found '{}'", left, right))
            }

            IncompatibleReturn { expected, found, span } | ArgumentTypeMismatch { expected, found, span, .. } => {
                diag.with_primary_label(file_id, *span, format!("expected '{}', found '{}'", expected, found))
            }

            CapturedVariableAssignment { span, .. } => diag
                .with_primary_label(file_id, *span, "assignment inside a lambda")
                .with_note("variables captured from an enclosing scope are read-only"),

            MissingEntryPoint { class, method, span } => diag
                .with_primary_label(file_id, *span, "no entry point")
                .with_help(format!("declare `static void {}()` in a non-abstract class {}", method, class)),

            NonStaticReference { span, .. } | ThisInStaticMethod { span } => diag
                .with_primary_label(file_id, *span, label(error.kind()))
                .with_note("static methods have no `this`"),

            _ => diag.with_primary_label(file_id, error.span(), label(error.kind())),
        }
    }

    /// Create diagnostic from a ParseError
    pub fn from_parse_error(error: &ParseError, file_id: usize) -> Self {
        let (code, text) = match &error.kind {
            ParseErrorKind::Lex(_) => (ErrorCode("E0001"), "invalid token"),
            _ => (ErrorCode("E0002"), "syntax error"),
        };
        let diag = Diagnostic::error(error.message.clone())
            .with_code(code)
            .with_primary_label(file_id, error.span, text);
        match &error.suggestion {
            Some(suggestion) => diag.with_help(suggestion.clone()),
            None => diag,
        }
    }

    /// Emit the diagnostic to stderr with colors
    pub fn emit(&self, files: &SimpleFiles<String, String>) -> Result<(), codespan_reporting::files::Error> {
        let mut writer = StandardStream::stderr(ColorChoice::Auto);
        self.emit_to(&mut writer, files)
    }

    /// Emit the diagnostic to any terminal writer
    pub fn emit_to(
        &self,
        writer: &mut dyn WriteColor,
        files: &SimpleFiles<String, String>,
    ) -> Result<(), codespan_reporting::files::Error> {
        let config = term::Config::default();
        term::emit(writer, &config, files, &self.inner)
    }

    /// Render without colors
    pub fn render(&self, files: &SimpleFiles<String, String>) -> Result<String, codespan_reporting::files::Error> {
        let mut writer = NoColor::new(Vec::new());
        self.emit_to(&mut writer, files)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    /// Get the underlying codespan diagnostic (for testing/custom rendering)
    pub fn inner(&self) -> &CsDiagnostic<usize> {
        &self.inner
    }

    /// Error code, if any
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Convert to JSON representation for IDE integration
    pub fn to_json(&self, files: &SimpleFiles<String, String>) -> Result<String, serde_json::Error> {
        let json_diag = JsonDiagnostic::from_diagnostic(self, files);
        serde_json::to_string_pretty(&json_diag)
    }
}

/// Short primary label for each error kind
fn label(kind: ErrorKind) -> &'static str {
    use ErrorKind::*;

    match kind {
        DeclarationConflict => "declared again here",
        ClassNotFound => "unknown class",
        CyclicInheritance => "closes an inheritance cycle",
        OverrideIncompatible => "incompatible override",
        MissingAbstractOverride => "class is not abstract",
        OverridingVariable => "hides an inherited variable",
        BadVariableType => "variable cannot be void",
        BadArrayElementType => "array element cannot be void",
        BadFunctionTypeArgument => "parameter cannot be void",
        MissingEntryPoint => "no entry point",
        AbstractInstantiation => "abstract class",
        UndeclaredVariable => "not found in this scope",
        NotAccessible => "protected member",
        NotAClassField => "not a field",
        NotAClassMethod => "not a method",
        NotCallable => "cannot be called",
        ArityMismatch => "wrong number of arguments",
        ArgumentTypeMismatch => "incompatible argument",
        IncompatibleAssignment => "incompatible assignment",
        IncompatibleReturn => "incompatible return",
        MissingReturn => "missing return",
        BreakOutsideLoop => "not inside a loop",
        InvalidTestExpression => "expected 'bool'",
        InvalidPrintArgument => "cannot be printed",
        CapturedVariableAssignment => "assignment inside a lambda",
        BadArrayLength => "expected 'int'",
        ThisInStaticMethod => "`this` in a static method",
        NonStaticReference => "instance member in a static method",
        FieldNotFound => "no such field",
        NotAnArray => "not an array",
        IndexNotInt => "expected 'int'",
        IncompatibleUnaryOp => "invalid operation",
        IncompatibleBinaryOp => "invalid operation",
        AssignToMethod => "cannot assign to a method",
        NotAClass => "not a class",
        ConflictingReturnTypes => "conflicting returns",
    }
}

/// JSON representation of a diagnostic for IDE integration
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    /// Error code (e.g., "E2001")
    pub code: Option<String>,
    /// Severity level
    pub severity: String,
    /// Main error message
    pub message: String,
    /// Source locations with labels
    pub labels: Vec<JsonLabel>,
    /// Additional notes and help
    pub notes: Vec<String>,
}

/// JSON representation of a diagnostic label
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLabel {
    /// File path
    pub file: String,
    /// Start line (1-indexed)
    pub start_line: usize,
    /// Start column (1-indexed)
    pub start_column: usize,
    /// End line (1-indexed)
    pub end_line: usize,
    /// End column (1-indexed)
    pub end_column: usize,
    /// Label message
    pub message: Option<String>,
    /// Label style (primary or secondary)
    pub style: String,
}

impl JsonDiagnostic {
    /// Convert a Diagnostic to JSON representation
    pub fn from_diagnostic(diag: &Diagnostic, files: &SimpleFiles<String, String>) -> Self {
        let severity = match diag.inner.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
            Severity::Help => "help",
            Severity::Bug => "bug",
        };

        let labels = diag
            .inner
            .labels
            .iter()
            .filter_map(|label| {
                let file = files.get(label.file_id).ok()?;
                let start = file.location((), label.range.start).ok()?;
                let end = file.location((), label.range.end).ok()?;

                Some(JsonLabel {
                    file: file.name().to_string(),
                    start_line: start.line_number,
                    start_column: start.column_number,
                    end_line: end.line_number,
                    end_column: end.column_number,
                    message: Some(label.message.clone()),
                    style: match label.style {
                        LabelStyle::Primary => "primary",
                        LabelStyle::Secondary => "secondary",
                    }
                    .to_string(),
                })
            })
            .collect();

        JsonDiagnostic {
            code: diag.code.map(|c| c.0.to_string()),
            severity: severity.to_string(),
            message: diag.inner.message.clone(),
            labels,
            notes: diag.inner.notes.clone(),
        }
    }
}

/// Helper to create a SimpleFiles instance from source code
pub fn create_files(path: impl Into<PathBuf>, source: impl Into<String>) -> SimpleFiles<String, String> {
    let mut files = SimpleFiles::new();
    files.add(path.into().display().to_string(), source.into());
    files
}
