//! Lexer for the Mocha programming language.
//!
//! Tokenizes with logos and converts the result into [`Token`]s carrying
//! precise source locations.

use crate::token::{Span, Token};
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum for lexing.
///
/// This enum is used internally by logos for efficient tokenization.
/// It's converted to our main Token enum after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    // Keywords (must come before identifiers)
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("abstract")]
    Abstract,
    #[token("static")]
    Static,
    #[token("var")]
    Var,
    #[token("fun")]
    Fun,
    #[token("int")]
    Int,
    #[token("bool")]
    Bool,
    #[token("string")]
    String,
    #[token("void")]
    Void,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("return")]
    Return,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("instanceof")]
    Instanceof,
    #[token("null")]
    Null,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("Print")]
    Print,
    #[token("ReadInteger")]
    ReadInteger,
    #[token("ReadLine")]
    ReadLine,

    // Identifiers (must come after keywords)
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(std::string::String),

    #[regex(r"0[xX][0-9a-fA-F]+", parse_hex)]
    #[regex(r"[0-9]+", parse_int)]
    IntLiteral(i32),

    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    StringLiteral(std::string::String),

    // Operators (2-char before 1-char)
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("=>")]
    Arrow,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("=")]
    Equal,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
}

fn parse_hex(lex: &mut logos::Lexer<LogosToken>) -> Option<i32> {
    let digits = &lex.slice()[2..];
    u32::from_str_radix(digits, 16).ok().map(|v| v as i32)
}

fn parse_int(lex: &mut logos::Lexer<LogosToken>) -> Option<i32> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<LogosToken>) -> Option<std::string::String> {
    let s = lex.slice();
    let inner = &s[1..s.len() - 1];
    Some(unescape_string(inner))
}

fn unescape_string(s: &str) -> std::string::String {
    let mut result = std::string::String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(c) => result.push(c),
                None => break,
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// Character that does not start any token
    #[error("unexpected character '{char}'")]
    UnexpectedCharacter {
        /// The offending character
        char: char,
        /// Location of the character
        span: Span,
    },

    /// String literal missing its closing quote
    #[error("unterminated string literal")]
    UnterminatedString {
        /// Location of the opening quote
        span: Span,
    },

    /// Integer literal that does not fit in 32 bits
    #[error("integer literal '{text}' is out of range")]
    InvalidNumber {
        /// Literal text
        text: std::string::String,
        /// Location of the literal
        span: Span,
    },
}

impl LexError {
    /// Source location of the error
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::InvalidNumber { span, .. } => *span,
        }
    }
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole input, appending a final [`Token::Eof`].
    ///
    /// All lexical errors are collected before returning.
    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let mut logos_lexer = LogosToken::lexer(self.source);
        let mut line = 1u32;
        let mut column = 1u32;
        let mut last_end = 0;

        while let Some(token_result) = logos_lexer.next() {
            let range = logos_lexer.span();

            // Update line and column based on skipped text
            advance_position(&self.source[last_end..range.start], &mut line, &mut column);

            let span = Span::new(range.start, range.end, line, column);

            match token_result {
                Ok(logos_token) => {
                    let token = convert_token(logos_token);
                    self.tokens.push((token, span));
                }
                Err(()) => {
                    let text = &self.source[range.start..range.end];
                    let first = text.chars().next().unwrap_or('\0');
                    let error = if first.is_ascii_digit() {
                        LexError::InvalidNumber {
                            text: text.to_string(),
                            span,
                        }
                    } else if first == '"' {
                        LexError::UnterminatedString { span }
                    } else {
                        LexError::UnexpectedCharacter { char: first, span }
                    };
                    self.errors.push(error);
                }
            }

            advance_position(&self.source[range.start..range.end], &mut line, &mut column);
            last_end = range.end;
        }

        advance_position(&self.source[last_end..], &mut line, &mut column);
        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

fn advance_position(text: &str, line: &mut u32, column: &mut u32) {
    for c in text.chars() {
        if c == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Class => Token::Class,
        LogosToken::Extends => Token::Extends,
        LogosToken::Abstract => Token::Abstract,
        LogosToken::Static => Token::Static,
        LogosToken::Var => Token::Var,
        LogosToken::Fun => Token::Fun,
        LogosToken::Int => Token::Int,
        LogosToken::Bool => Token::Bool,
        LogosToken::String => Token::String,
        LogosToken::Void => Token::Void,
        LogosToken::If => Token::If,
        LogosToken::Else => Token::Else,
        LogosToken::While => Token::While,
        LogosToken::For => Token::For,
        LogosToken::Break => Token::Break,
        LogosToken::Return => Token::Return,
        LogosToken::New => Token::New,
        LogosToken::This => Token::This,
        LogosToken::Instanceof => Token::Instanceof,
        LogosToken::Null => Token::Null,
        LogosToken::True => Token::True,
        LogosToken::False => Token::False,
        LogosToken::Print => Token::Print,
        LogosToken::ReadInteger => Token::ReadInteger,
        LogosToken::ReadLine => Token::ReadLine,
        LogosToken::Identifier(name) => Token::Identifier(name),
        LogosToken::IntLiteral(n) => Token::IntLiteral(n),
        LogosToken::StringLiteral(s) => Token::StringLiteral(s),
        LogosToken::EqualEqual => Token::EqualEqual,
        LogosToken::BangEqual => Token::BangEqual,
        LogosToken::LessEqual => Token::LessEqual,
        LogosToken::GreaterEqual => Token::GreaterEqual,
        LogosToken::AmpAmp => Token::AmpAmp,
        LogosToken::PipePipe => Token::PipePipe,
        LogosToken::Arrow => Token::Arrow,
        LogosToken::Plus => Token::Plus,
        LogosToken::Minus => Token::Minus,
        LogosToken::Star => Token::Star,
        LogosToken::Slash => Token::Slash,
        LogosToken::Percent => Token::Percent,
        LogosToken::Bang => Token::Bang,
        LogosToken::Less => Token::Less,
        LogosToken::Greater => Token::Greater,
        LogosToken::Equal => Token::Equal,
        LogosToken::Dot => Token::Dot,
        LogosToken::Comma => Token::Comma,
        LogosToken::Semicolon => Token::Semicolon,
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::LeftBracket => Token::LeftBracket,
        LogosToken::RightBracket => Token::RightBracket,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        // Skipped by logos, never produced
        LogosToken::Whitespace | LogosToken::LineComment => Token::Eof,
    }
}
