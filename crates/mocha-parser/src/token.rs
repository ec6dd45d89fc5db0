//! Token definitions for the Mocha programming language.
//!
//! This module defines all tokens that can appear in Mocha source code,
//! including keywords, operators, literals, and special tokens.

use std::fmt;

/// A token in the Mocha programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Declarations
    Class,
    Extends,
    Abstract,
    Static,
    Var,
    Fun,

    // Types
    Int,
    Bool,
    String,
    Void,

    // Control flow
    If,
    Else,
    While,
    For,
    Break,
    Return,

    // Expressions
    New,
    This,
    Instanceof,
    Null,
    True,
    False,

    // Built-in operations
    Print,
    ReadInteger,
    ReadLine,

    // Literals
    IntLiteral(i32),
    StringLiteral(std::string::String),
    Identifier(std::string::String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    Equal,
    Arrow,

    // Punctuation
    Dot,
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,

    /// End of input
    Eof,
}

impl Token {
    /// Check if this token starts a type (`int`, `bool`, `string`, `void`, `class`)
    pub fn starts_type(&self) -> bool {
        matches!(
            self,
            Token::Int | Token::Bool | Token::String | Token::Void | Token::Class
        )
    }

    /// Get the identifier name if this is an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// Source location: byte range plus 1-based line/column of the start.
///
/// Spans order by their start offset, which is how "declared before use"
/// is decided for local variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Span from the start of `self` to the end of `other`
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Class => write!(f, "class"),
            Token::Extends => write!(f, "extends"),
            Token::Abstract => write!(f, "abstract"),
            Token::Static => write!(f, "static"),
            Token::Var => write!(f, "var"),
            Token::Fun => write!(f, "fun"),
            Token::Int => write!(f, "int"),
            Token::Bool => write!(f, "bool"),
            Token::String => write!(f, "string"),
            Token::Void => write!(f, "void"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::For => write!(f, "for"),
            Token::Break => write!(f, "break"),
            Token::Return => write!(f, "return"),
            Token::New => write!(f, "new"),
            Token::This => write!(f, "this"),
            Token::Instanceof => write!(f, "instanceof"),
            Token::Null => write!(f, "null"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Print => write!(f, "Print"),
            Token::ReadInteger => write!(f, "ReadInteger"),
            Token::ReadLine => write!(f, "ReadLine"),
            Token::IntLiteral(n) => write!(f, "{}", n),
            Token::StringLiteral(_) => write!(f, "\"<string>\""),
            Token::Identifier(_) => write!(f, "<identifier>"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Bang => write!(f, "!"),
            Token::EqualEqual => write!(f, "=="),
            Token::BangEqual => write!(f, "!="),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::Equal => write!(f, "="),
            Token::Arrow => write!(f, "=>"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Eof => write!(f, "<eof>"),
        }
    }
}
