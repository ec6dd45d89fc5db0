//! Mocha Semantic Checker
//!
//! Name resolution and type checking for Mocha.
//!
//! This crate provides:
//! - Arena-backed scopes and symbols with a lexical scope stack
//! - The Namer pass: classes, inheritance, members, overrides, locals and closures
//! - The Typer pass: expression types, statement checks, captures and inference
//! - Dispatch layouts and the program entry point
//! - Diagnostics rendered through codespan or as JSON
//!
//! # Usage
//!
//! ```
//! use mocha_checker::{analyze_source, CheckerConfig};
//!
//! let source = "class Main { static void main() { Print(\"hi\"); } }";
//! let analysis = analyze_source(source, &CheckerConfig::default()).unwrap();
//! assert!(!analysis.has_errors());
//! ```

#![warn(missing_docs)]

pub mod captures;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod layout;
pub mod model;
pub mod namer;
pub mod scope_stack;
pub mod symbols;
pub mod typer;

pub use captures::CaptureSet;
pub use config::{CheckerConfig, ConfigError};
pub use diagnostic::{create_files, Diagnostic, ErrorCode, JsonDiagnostic};
pub use error::{Diagnostics, ErrorKind, SemanticError};
pub use layout::ClassLayout;
pub use model::{Reference, SemanticModel};
pub use namer::{NameResolution, Namer};
pub use scope_stack::ScopeStack;
pub use symbols::{Scope, ScopeId, ScopeKind, Symbol, SymbolId, SymbolKind, SymbolTable};
pub use typer::Typer;

use mocha_parser::{parse_program, NodeId, ParseError, Program};
use mocha_types::{TypeContext, TypeId};
use tracing::{debug, instrument};

/// Everything the semantic passes produce for one program
#[derive(Debug)]
pub struct Analysis {
    /// Interned types
    pub types: TypeContext,
    /// Scopes and symbols
    pub symbols: SymbolTable,
    /// Per-node annotations
    pub model: SemanticModel,
    /// Errors from both passes, Namer first
    pub diagnostics: Diagnostics,
}

impl Analysis {
    /// Whether any pass reported an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Type recorded for an expression
    pub fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.model.type_of(node)
    }

    /// Look up a class symbol by name
    pub fn class(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .lookup(SymbolTable::GLOBAL, name)
            .filter(|&s| self.symbols.symbol(s).is_class())
    }

    /// Look up a member of a class, searching super-classes too
    pub fn member(&self, class: &str, name: &str) -> Option<SymbolId> {
        let scope = self.symbols.symbol(self.class(class)?).as_class()?.scope;
        self.symbols.lookup_chain(scope, name)
    }

    /// Render a symbol's type
    pub fn display_type(&self, symbol: SymbolId) -> String {
        self.types.display(self.symbols.symbol(symbol).ty)
    }
}

/// Run the Namer and then the Typer over a parsed program
///
/// The Typer is skipped only when the Namer found an inheritance cycle;
/// other Namer errors are kept and checking continues.
#[instrument(skip_all)]
pub fn analyze(program: &Program, config: &CheckerConfig) -> Analysis {
    let mut types = TypeContext::new();
    let NameResolution {
        mut symbols,
        mut model,
        mut diagnostics,
        fatal,
    } = Namer::new(&mut types, config).run(program);

    if fatal {
        debug!("skipping typer after fatal naming errors");
    } else {
        let typer_diagnostics = Typer::new(&mut types, &mut symbols, &mut model).check_program(program);
        diagnostics.extend(typer_diagnostics);
    }

    Analysis {
        types,
        symbols,
        model,
        diagnostics,
    }
}

/// Parse and analyze a compilation unit
pub fn analyze_source(source: &str, config: &CheckerConfig) -> Result<Analysis, Vec<ParseError>> {
    let program = parse_program(source)?;
    Ok(analyze(&program, config))
}
