//! Mocha Language Parser
//!
//! Lexer, syntax tree and recursive descent parser for Mocha, a small
//! class-based language with single inheritance, arrays and closures.

#![warn(missing_docs)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use token::{Span, Token};

/// Lex and parse a whole compilation unit.
///
/// Lexical errors are reported as [`ParseErrorKind::Lex`] so callers deal
/// with a single error type.
pub fn parse_program(source: &str) -> Result<Program, Vec<ParseError>> {
    let parser = Parser::new(source)
        .map_err(|errors| errors.into_iter().map(ParseError::from).collect::<Vec<_>>())?;
    parser.parse()
}
