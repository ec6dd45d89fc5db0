//! Operator precedence table for expression parsing.

use crate::ast::BinaryOperator;
use crate::token::Token;

/// Operator precedence level (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    LogicalOr = 1,      // ||
    LogicalAnd = 2,     // &&
    Equality = 3,       // ==, !=
    Relational = 4,     // <, >, <=, >=
    Additive = 5,       // +, -
    Multiplicative = 6, // *, /, %
    Unary = 7,          // !, -
}

impl Precedence {
    /// The next tighter level, used for left-associative operands.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative | Precedence::Unary => Precedence::Unary,
        }
    }
}

/// Get the precedence of a binary operator token.
pub fn get_precedence(token: &Token) -> Precedence {
    match token {
        Token::PipePipe => Precedence::LogicalOr,
        Token::AmpAmp => Precedence::LogicalAnd,
        Token::EqualEqual | Token::BangEqual => Precedence::Equality,
        Token::Less | Token::LessEqual | Token::Greater | Token::GreaterEqual => Precedence::Relational,
        Token::Plus | Token::Minus => Precedence::Additive,
        Token::Star | Token::Slash | Token::Percent => Precedence::Multiplicative,
        _ => Precedence::None,
    }
}

/// Map a binary operator token to its AST operator.
pub fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::PipePipe => BinaryOperator::Or,
        Token::AmpAmp => BinaryOperator::And,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::Less,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::Greater,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Subtract,
        Token::Star => BinaryOperator::Multiply,
        Token::Slash => BinaryOperator::Divide,
        Token::Percent => BinaryOperator::Modulo,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(get_precedence(&Token::PipePipe) < get_precedence(&Token::AmpAmp));
        assert!(get_precedence(&Token::AmpAmp) < get_precedence(&Token::EqualEqual));
        assert!(get_precedence(&Token::EqualEqual) < get_precedence(&Token::Less));
        assert!(get_precedence(&Token::Less) < get_precedence(&Token::Plus));
        assert!(get_precedence(&Token::Plus) < get_precedence(&Token::Star));
        assert_eq!(get_precedence(&Token::Semicolon), Precedence::None);
    }
}
