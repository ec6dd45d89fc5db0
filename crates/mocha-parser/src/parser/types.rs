//! Type annotation parsing

use super::{ParseError, Parser};
use crate::ast::*;
use crate::token::Token;

/// Parse a type: a base type followed by any number of `[]` and `(types)`
/// suffixes.
///
/// A `[` not followed by `]` ends the type, leaving `new T[n]` to the caller.
pub fn parse_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let mut ty = parse_base_type(parser)?;

    loop {
        if parser.check(&Token::LeftBracket) && matches!(parser.peek(), Some(Token::RightBracket)) {
            parser.advance();
            parser.advance();
            let span = ty.span.to(&parser.previous_span());
            ty = TypeAnnotation {
                kind: TypeKind::Array(Box::new(ty)),
                span,
            };
        } else if parser.check(&Token::LeftParen) {
            parser.advance();
            let mut params = Vec::new();
            if !parser.check(&Token::RightParen) {
                loop {
                    params.push(parse_type(parser)?);
                    if !parser.eat(&Token::Comma) {
                        break;
                    }
                }
            }
            parser.expect(Token::RightParen)?;
            let span = ty.span.to(&parser.previous_span());
            ty = TypeAnnotation {
                kind: TypeKind::Function {
                    return_type: Box::new(ty),
                    params,
                },
                span,
            };
        } else {
            break;
        }
    }

    Ok(ty)
}

fn parse_base_type(parser: &mut Parser) -> Result<TypeAnnotation, ParseError> {
    let span = parser.current_span();
    let kind = match parser.current() {
        Token::Int => TypeKind::Int,
        Token::Bool => TypeKind::Bool,
        Token::String => TypeKind::String,
        Token::Void => TypeKind::Void,
        Token::Class => {
            parser.advance();
            let name = parser.expect_identifier()?;
            let span = span.to(&name.span);
            return Ok(TypeAnnotation {
                kind: TypeKind::Class(name),
                span,
            });
        }
        _ => {
            return Err(parser.unexpected_token(&[
                Token::Int,
                Token::Bool,
                Token::String,
                Token::Void,
                Token::Class,
            ]))
        }
    };
    parser.advance();
    Ok(TypeAnnotation { kind, span })
}
