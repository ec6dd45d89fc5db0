//! Expression parsing

use super::precedence::{binary_operator, get_precedence, Precedence};
use super::{class, stmt, types, ParseError, Parser};
use crate::ast::*;
use crate::token::{Span, Token};

/// Parse an expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    parse_binary(parser, Precedence::LogicalOr)
}

/// Parse `( e1, e2, ... )`.
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expression>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut arguments = Vec::new();
    if !parser.check(&Token::RightParen) {
        loop {
            arguments.push(parse_expression(parser)?);
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
    }
    parser.expect(Token::RightParen)?;
    Ok(arguments)
}

fn make(parser: &mut Parser, kind: ExpressionKind, span: Span) -> Expression {
    Expression {
        id: parser.node_id(),
        kind,
        span,
    }
}

/// Precedence climbing over left-associative binary operators.
fn parse_binary(parser: &mut Parser, min: Precedence) -> Result<Expression, ParseError> {
    let mut left = parse_unary(parser)?;

    loop {
        let prec = get_precedence(parser.current());
        if prec == Precedence::None || prec < min {
            break;
        }
        let Some(operator) = binary_operator(parser.current()) else {
            break;
        };
        parser.advance();

        let right = parse_binary(parser, prec.next())?;
        let span = left.span.to(&right.span);
        left = make(
            parser,
            ExpressionKind::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            }),
            span,
        );
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.current_span();
    let operator = match parser.current() {
        Token::Minus => UnaryOperator::Negate,
        Token::Bang => UnaryOperator::Not,
        _ => return parse_postfix(parser),
    };
    parser.advance();

    let operand = parse_unary(parser)?;
    let span = start.to(&operand.span);
    Ok(make(
        parser,
        ExpressionKind::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
        }),
        span,
    ))
}

fn parse_postfix(parser: &mut Parser) -> Result<Expression, ParseError> {
    let mut expr = parse_primary(parser)?;

    loop {
        match parser.current() {
            Token::Dot => {
                parser.advance();
                let name = parser.expect_identifier()?;
                let span = expr.span.to(&name.span);
                expr = make(
                    parser,
                    ExpressionKind::Variable(VarSelect {
                        receiver: Some(Box::new(expr)),
                        name,
                    }),
                    span,
                );
            }
            Token::LeftBracket => {
                parser.advance();
                let index = parse_expression(parser)?;
                parser.expect(Token::RightBracket)?;
                let span = expr.span.to(&parser.previous_span());
                expr = make(
                    parser,
                    ExpressionKind::Index(IndexExpression {
                        array: Box::new(expr),
                        index: Box::new(index),
                    }),
                    span,
                );
            }
            Token::LeftParen => {
                let arguments = parse_arguments(parser)?;
                let span = expr.span.to(&parser.previous_span());
                expr = make(
                    parser,
                    ExpressionKind::Call(CallExpression {
                        callee: Box::new(expr),
                        arguments,
                    }),
                    span,
                );
            }
            _ => break,
        }
    }

    Ok(expr)
}

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.current_span();

    let kind = match parser.current().clone() {
        Token::IntLiteral(value) => ExpressionKind::IntLiteral(value),
        Token::StringLiteral(value) => ExpressionKind::StringLiteral(value),
        Token::True => ExpressionKind::BoolLiteral(true),
        Token::False => ExpressionKind::BoolLiteral(false),
        Token::Null => ExpressionKind::Null,
        Token::This => ExpressionKind::This,
        Token::Identifier(name) => ExpressionKind::Variable(VarSelect {
            receiver: None,
            name: Identifier::new(name, start),
        }),
        Token::ReadInteger | Token::ReadLine => {
            let kind = if parser.check(&Token::ReadInteger) {
                ExpressionKind::ReadInteger
            } else {
                ExpressionKind::ReadLine
            };
            parser.advance();
            parser.expect(Token::LeftParen)?;
            parser.expect(Token::RightParen)?;
            let span = start.to(&parser.previous_span());
            return Ok(make(parser, kind, span));
        }
        Token::New => return parse_new(parser),
        Token::Instanceof => return parse_instanceof(parser),
        Token::Fun => return parse_lambda(parser),
        Token::LeftParen => {
            if matches!(parser.peek(), Some(Token::Class)) {
                return parse_cast(parser);
            }
            parser.advance();
            let inner = parse_expression(parser)?;
            parser.expect(Token::RightParen)?;
            return Ok(inner);
        }
        _ => {
            return Err(ParseError::invalid_syntax(
                format!("expected an expression, found '{}'", parser.current()),
                start,
            ))
        }
    };

    parser.advance();
    Ok(make(parser, kind, start))
}

/// `new A()` or `new T[n]`
fn parse_new(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(Token::New)?;

    if matches!(parser.current(), Token::Identifier(_)) {
        let class = parser.expect_identifier()?;
        parser.expect(Token::LeftParen)?;
        parser.expect(Token::RightParen)?;
        let span = start.to(&parser.previous_span());
        return Ok(make(parser, ExpressionKind::NewClass(NewClassExpression { class }), span));
    }

    let element = types::parse_type(parser)?;
    parser.expect(Token::LeftBracket)?;
    let length = parse_expression(parser)?;
    parser.expect(Token::RightBracket)?;
    let span = start.to(&parser.previous_span());
    Ok(make(
        parser,
        ExpressionKind::NewArray(NewArrayExpression {
            element,
            length: Box::new(length),
        }),
        span,
    ))
}

/// `instanceof(e, A)`
fn parse_instanceof(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(Token::Instanceof)?;
    parser.expect(Token::LeftParen)?;
    let object = parse_expression(parser)?;
    parser.expect(Token::Comma)?;
    let class = parser.expect_identifier()?;
    parser.expect(Token::RightParen)?;
    let span = start.to(&parser.previous_span());
    Ok(make(
        parser,
        ExpressionKind::InstanceOf(ClassTestExpression {
            object: Box::new(object),
            class,
        }),
        span,
    ))
}

/// `(class A) e`
fn parse_cast(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(Token::LeftParen)?;
    parser.expect(Token::Class)?;
    let class = parser.expect_identifier()?;
    parser.expect(Token::RightParen)?;
    let object = parse_unary(parser)?;
    let span = start.to(&object.span);
    Ok(make(
        parser,
        ExpressionKind::Cast(ClassTestExpression {
            object: Box::new(object),
            class,
        }),
        span,
    ))
}

/// `fun (params) => e` or `fun (params) { ... }`
fn parse_lambda(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(Token::Fun)?;
    let params = class::parse_params(parser)?;
    let body = if parser.eat(&Token::Arrow) {
        LambdaBody::Expression(Box::new(parse_expression(parser)?))
    } else {
        LambdaBody::Block(stmt::parse_block(parser)?)
    };
    let span = start.to(&parser.previous_span());
    Ok(make(parser, ExpressionKind::Lambda(LambdaExpression { params, body }), span))
}
