//! Statement parsing

use super::{expr, recovery, types, ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};

/// Parse `{ statements }`, recovering from errors in individual statements.
pub fn parse_block(parser: &mut Parser) -> Result<Block, ParseError> {
    let start = parser.expect(Token::LeftBrace)?;
    let mut statements = Vec::new();

    while !parser.check(&Token::RightBrace) && !parser.at_eof() {
        let before = parser.current_span();
        match parse_statement(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(err) => {
                parser.error(err);
                recovery::sync_to_statement_boundary(parser);
                // Guarantee progress when the failing token starts a statement
                if parser.current_span() == before {
                    parser.advance();
                }
            }
        }
    }
    parser.expect(Token::RightBrace)?;

    Ok(Block {
        id: parser.node_id(),
        statements,
        span: start.to(&parser.previous_span()),
    })
}

/// Parse a single statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current() {
        Token::LeftBrace => Ok(Statement::Block(parse_block(parser)?)),
        Token::If => parse_if(parser),
        Token::While => parse_while(parser),
        Token::For => parse_for(parser),
        Token::Break => {
            let start = parser.current_span();
            parser.advance();
            parser.expect(Token::Semicolon)?;
            Ok(Statement::Break(start.to(&parser.previous_span())))
        }
        Token::Return => parse_return(parser),
        Token::Print => parse_print(parser),
        _ => {
            let stmt = parse_simple(parser)?;
            parser.expect(Token::Semicolon)?;
            Ok(stmt)
        }
    }
}

/// Parse a simple statement: declaration, assignment, expression, or nothing.
///
/// Used for plain statements and for the `init`/`update` parts of `for`.
pub fn parse_simple(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.current_span();

    if parser.check(&Token::Semicolon) || parser.check(&Token::RightParen) {
        return Ok(Statement::Empty(Span::new(start.start, start.start, start.line, start.column)));
    }

    if parser.current().starts_type() {
        let type_ann = types::parse_type(parser)?;
        let name = parser.expect_identifier()?;
        let (init, assign_span) = if parser.check(&Token::Equal) {
            let assign_span = parser.expect(Token::Equal)?;
            (Some(expr::parse_expression(parser)?), Some(assign_span))
        } else {
            (None, None)
        };
        return Ok(Statement::LocalVar(LocalVarDecl {
            id: parser.node_id(),
            type_ann: Some(type_ann),
            name,
            init,
            assign_span,
            span: start.to(&parser.previous_span()),
        }));
    }

    if parser.eat(&Token::Var) {
        let name = parser.expect_identifier()?;
        let assign_span = parser.expect(Token::Equal)?;
        let init = expr::parse_expression(parser)?;
        return Ok(Statement::LocalVar(LocalVarDecl {
            id: parser.node_id(),
            type_ann: None,
            name,
            init: Some(init),
            assign_span: Some(assign_span),
            span: start.to(&parser.previous_span()),
        }));
    }

    let expression = expr::parse_expression(parser)?;
    if parser.check(&Token::Equal) {
        parser.advance();
        if !expression.is_lvalue() {
            return Err(ParseError::invalid_syntax("invalid assignment target", expression.span)
                .with_suggestion("only variables, fields and array elements can be assigned"));
        }
        let value = expr::parse_expression(parser)?;
        return Ok(Statement::Assign(AssignStatement {
            target: expression,
            value,
            span: start.to(&parser.previous_span()),
        }));
    }

    Ok(Statement::Expression(ExpressionStatement {
        span: expression.span,
        expression,
    }))
}

/// Parse the body of a compound statement; a lone statement gets its own block.
fn parse_body(parser: &mut Parser) -> Result<Block, ParseError> {
    if parser.check(&Token::LeftBrace) {
        return parse_block(parser);
    }
    let stmt = parse_statement(parser)?;
    Ok(Block {
        id: parser.node_id(),
        span: *stmt.span(),
        statements: vec![stmt],
    })
}

fn parse_condition(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.expect(Token::LeftParen)?;
    let condition = expr::parse_expression(parser)?;
    parser.expect(Token::RightParen)?;
    Ok(condition)
}

fn parse_if(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(Token::If)?;
    let condition = parse_condition(parser)?;
    let then_branch = parse_body(parser)?;
    let else_branch = if parser.eat(&Token::Else) {
        Some(parse_body(parser)?)
    } else {
        None
    };
    Ok(Statement::If(IfStatement {
        condition,
        then_branch,
        else_branch,
        span: start.to(&parser.previous_span()),
    }))
}

fn parse_while(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(Token::While)?;
    let condition = parse_condition(parser)?;
    let body = parse_body(parser)?;
    Ok(Statement::While(WhileStatement {
        condition,
        body,
        span: start.to(&parser.previous_span()),
    }))
}

fn parse_for(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(Token::For)?;
    parser.expect(Token::LeftParen)?;
    let init = parse_simple(parser)?;
    parser.expect(Token::Semicolon)?;
    let condition = expr::parse_expression(parser)?;
    parser.expect(Token::Semicolon)?;
    let update = parse_simple(parser)?;
    parser.expect(Token::RightParen)?;
    let body = parse_body(parser)?;
    Ok(Statement::For(ForStatement {
        id: parser.node_id(),
        init: Box::new(init),
        condition,
        update: Box::new(update),
        body,
        span: start.to(&parser.previous_span()),
    }))
}

fn parse_return(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(Token::Return)?;
    let value = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };
    parser.expect(Token::Semicolon)?;
    Ok(Statement::Return(ReturnStatement {
        value,
        span: start.to(&parser.previous_span()),
    }))
}

fn parse_print(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(Token::Print)?;
    let arguments = expr::parse_arguments(parser)?;
    parser.expect(Token::Semicolon)?;
    Ok(Statement::Print(PrintStatement {
        arguments,
        span: start.to(&parser.previous_span()),
    }))
}
