//! Class and member parsing

use super::{recovery, stmt, types, ParseError, Parser};
use crate::ast::*;
use crate::token::Token;

/// Parse `abstract? class Name (extends Parent)? { members }`.
///
/// Member errors are recorded and skipped so the rest of the class is
/// still parsed.
pub fn parse_class(parser: &mut Parser) -> Result<ClassDef, ParseError> {
    let start = parser.current_span();
    let is_abstract = parser.eat(&Token::Abstract);
    parser.expect(Token::Class)?;
    let name = parser.expect_identifier()?;
    let parent = if parser.eat(&Token::Extends) {
        Some(parser.expect_identifier()?)
    } else {
        None
    };
    parser.expect(Token::LeftBrace)?;

    let mut members = Vec::new();
    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        match parse_member(parser) {
            Ok(member) => members.push(member),
            Err(err) => {
                parser.error(err);
                recovery::sync_to_member_boundary(parser);
            }
        }
    }
    parser.expect(Token::RightBrace)?;

    Ok(ClassDef {
        id: parser.node_id(),
        is_abstract,
        name,
        parent,
        members,
        span: start.to(&parser.previous_span()),
    })
}

fn parse_member(parser: &mut Parser) -> Result<Member, ParseError> {
    let start = parser.current_span();
    let mut modifiers = Modifiers::default();
    if parser.eat(&Token::Static) {
        modifiers.is_static = true;
    } else if parser.eat(&Token::Abstract) {
        modifiers.is_abstract = true;
    }

    let type_ann = types::parse_type(parser)?;
    let name = parser.expect_identifier()?;

    if parser.check(&Token::LeftParen) {
        let params = parse_params(parser)?;
        let body = if modifiers.is_abstract {
            parser.expect(Token::Semicolon)?;
            None
        } else {
            Some(stmt::parse_block(parser)?)
        };
        return Ok(Member::Method(MethodDef {
            id: parser.node_id(),
            modifiers,
            return_type: type_ann,
            name,
            params,
            body,
            span: start.to(&parser.previous_span()),
        }));
    }

    if modifiers.is_static || modifiers.is_abstract {
        return Err(ParseError::invalid_syntax(
            format!("member variable '{}' cannot be static or abstract", name.name),
            start,
        ));
    }
    parser.expect(Token::Semicolon)?;

    Ok(Member::Var(VarDef {
        id: parser.node_id(),
        type_ann,
        name,
        span: start.to(&parser.previous_span()),
    }))
}

/// Parse `( type name, ... )`.
pub fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut params = Vec::new();
    if !parser.check(&Token::RightParen) {
        loop {
            let start = parser.current_span();
            let type_ann = types::parse_type(parser)?;
            let name = parser.expect_identifier()?;
            params.push(Param {
                id: parser.node_id(),
                type_ann,
                name,
                span: start.to(&parser.previous_span()),
            });
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }
    parser.expect(Token::RightParen)?;
    Ok(params)
}
