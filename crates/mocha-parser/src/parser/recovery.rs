//! Error recovery strategies for the parser.
//!
//! When the parser encounters an error, it uses these strategies to
//! resynchronize and continue parsing to find more errors.

use super::Parser;
use crate::token::Token;

/// Synchronize to the next statement boundary.
///
/// This is used after encountering a parse error to skip tokens until
/// we reach a point where statement parsing can resume.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            // Statement-starting tokens
            Token::If
            | Token::While
            | Token::For
            | Token::Return
            | Token::Break
            | Token::Print
            | Token::Var
            | Token::Int
            | Token::Bool
            | Token::String
            | Token::Void => return,

            // Semicolon marks end of previous statement
            Token::Semicolon => {
                parser.advance();
                return;
            }

            // Closing brace might end a block
            Token::RightBrace => return,

            _ => {
                parser.advance();
            }
        }
    }
}

/// Synchronize to the next member of a class body.
pub fn sync_to_member_boundary(parser: &mut Parser) {
    let mut depth = 0usize;
    while !parser.at_eof() {
        match parser.current() {
            Token::LeftBrace => depth += 1,
            Token::RightBrace if depth == 0 => return,
            Token::RightBrace => {
                depth -= 1;
                if depth == 0 {
                    parser.advance();
                    return;
                }
            }
            Token::Semicolon if depth == 0 => {
                parser.advance();
                return;
            }
            Token::Static | Token::Abstract if depth == 0 => return,
            _ => {}
        }
        parser.advance();
    }
}

/// Synchronize to the next top-level class definition.
pub fn sync_to_class_boundary(parser: &mut Parser) {
    // Always make progress past the token that failed
    parser.advance();
    while !parser.at_eof() {
        if parser.check(&Token::Class) || parser.check(&Token::Abstract) {
            return;
        }
        parser.advance();
    }
}
