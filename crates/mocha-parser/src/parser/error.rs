//! Parse error types and error reporting

use crate::lexer::LexError;
use crate::token::{Span, Token};
use thiserror::Error;

/// A parse error with location and contextual information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at {}:{}: {}", .span.line, .span.column, .message)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// Human-readable error message
    pub message: String,

    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token found
    UnexpectedToken { expected: Vec<Token>, found: Token },

    /// Unexpected end of file
    UnexpectedEof { expected: Vec<Token> },

    /// Invalid syntax
    InvalidSyntax { reason: String },

    /// Error from the lexer
    Lex(LexError),
}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = format!("expected {}, found '{}'", describe(&expected), found);
        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = format!("unexpected end of file, expected {}", describe(&expected));
        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(reason: impl Into<String>, span: Span) -> Self {
        let reason = reason.into();
        Self {
            message: reason.clone(),
            kind: ParseErrorKind::InvalidSyntax { reason },
            span,
            suggestion: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self {
            span: error.span(),
            message: error.to_string(),
            kind: ParseErrorKind::Lex(error),
            suggestion: None,
        }
    }
}

fn describe(expected: &[Token]) -> String {
    let names: Vec<String> = expected.iter().map(|t| format!("'{}'", t)).collect();
    match names.len() {
        0 => "more input".to_string(),
        1 => names[0].clone(),
        _ => format!("one of {}", names.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::unexpected_token(vec![Token::Semicolon], Token::RightBrace, Span::new(4, 5, 1, 5));
        assert_eq!(err.message, "expected ';', found '}'");
        assert_eq!(err.to_string(), "Parse error at 1:5: expected ';', found '}'");
    }

    #[test]
    fn test_from_lex_error() {
        let lex = LexError::UnexpectedCharacter { char: '#', span: Span::new(0, 1, 1, 1) };
        let err = ParseError::from(lex.clone());
        assert_eq!(err.kind, ParseErrorKind::Lex(lex));
        assert_eq!(err.message, "unexpected character '#'");
    }
}
