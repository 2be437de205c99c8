use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, LValue, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{eat_symbol, expect_symbol, parse_comma_separated, peek_position},
        },
    },
    util::num::hex_to_i32,
};

/// Parses a prefix expression.
///
/// Prefix operators nest, so `--x` and `!!flag` are accepted.
///
/// Grammar: `unary := ("-" | "!" | "~") unary | primary`
///
/// # Returns
/// `Ok(None)` if no expression starts at the current token.
///
/// # Errors
/// `SubExpressionExpected` if an operator is not followed by an operand.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let op_token = tokens.peek()
                         .copied()
                         .filter(|t| t.kind == TokenKind::Symbol)
                         .and_then(|t| UnaryOperator::from_symbol(&t.text).map(|op| (op, t)));

    let Some((op, token)) = op_token else {
        return parse_primary(tokens);
    };
    tokens.next();

    let Some(expr) = parse_unary(tokens)? else {
        return Err(ParseError::SubExpressionExpected { position: peek_position(tokens) });
    };

    Ok(Some(Expr::UnaryOp { op,
                            expr: Box::new(expr),
                            position: token.position.clone() }))
}

/// Parses a primary expression.
///
/// Alternatives are tried in order: function call, lvalue, string, double,
/// integer, hex integer and boolean literals, list literal and parenthesised
/// expression.
///
/// # Returns
/// `Ok(None)` without consuming anything if none of them matches.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(call) = parse_function_call(tokens)? {
        return Ok(Some(call));
    }
    if let Some(lvalue) = parse_lvalue(tokens)? {
        return Ok(Some(Expr::LValue(lvalue)));
    }

    let Some(token) = tokens.peek().copied() else {
        return Ok(None);
    };
    let position = token.position.clone();

    let value = match token.kind {
        TokenKind::String => LiteralValue::Str(Rc::from(token.text.as_str())),
        TokenKind::Double => {
            let value = token.text.parse::<f64>().map_err(|_| out_of_range(token))?;
            LiteralValue::Double(value)
        },
        TokenKind::Integer => {
            let value = token.text.parse::<i32>().map_err(|_| out_of_range(token))?;
            LiteralValue::Integer(value)
        },
        TokenKind::HexInteger => {
            LiteralValue::Integer(hex_to_i32(&token.text).ok_or_else(|| out_of_range(token))?)
        },
        TokenKind::Boolean => LiteralValue::Bool(token.text == "true"),
        TokenKind::Symbol if token.text == "[" => return parse_list_literal(tokens).map(Some),
        TokenKind::Symbol if token.text == "(" => {
            tokens.next();
            let expr = parse_expression(tokens)?;
            expect_symbol(tokens, ")")?;
            return Ok(Some(expr));
        },
        _ => return Ok(None),
    };
    tokens.next();

    Ok(Some(Expr::Constant { value, position }))
}

/// Parses an assignable location: `name`, `...` or `name[index]`.
///
/// # Returns
/// `Ok(None)` without consuming anything if the current token is neither an
/// identifier nor `...`.
pub fn parse_lvalue<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<LValue>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(token) = tokens.peek().copied() else {
        return Ok(None);
    };
    if token.kind != TokenKind::Identifier && !token.is_symbol("...") {
        return Ok(None);
    }
    tokens.next();

    let name = token.text.clone();
    let position = token.position.clone();

    if !eat_symbol(tokens, "[") {
        return Ok(Some(LValue::Variable { name, position }));
    }
    let index = parse_expression(tokens)?;
    expect_symbol(tokens, "]")?;

    Ok(Some(LValue::Index { name,
                            index: Box::new(index),
                            position }))
}

/// Parses a function call `name(arg1, ..., argN)`.
///
/// # Returns
/// `Ok(None)` without consuming anything unless an identifier is directly
/// followed by `(`.
pub fn parse_function_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut lookahead = tokens.clone();
    let Some(token) = lookahead.next().filter(|t| t.kind == TokenKind::Identifier) else {
        return Ok(None);
    };
    if !lookahead.peek().is_some_and(|t| t.is_symbol("(")) {
        return Ok(None);
    }
    tokens.next();
    tokens.next();

    let arguments = parse_comma_separated(tokens, parse_expression, ")")?;

    Ok(Some(Expr::FunctionCall { name: token.text.clone(),
                                 arguments,
                                 position: token.position.clone() }))
}

/// Parses a list literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// An empty list `[]` is accepted.
///
/// Grammar: `list := "[" (expression ("," expression)*)? "]"`
fn parse_list_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    let position = peek_position(tokens);
    expect_symbol(tokens, "[")?;

    let elements = parse_comma_separated(tokens, parse_expression, "]")?;

    Ok(Expr::ListLiteral { elements, position })
}

fn out_of_range(token: &Token) -> ParseError {
    ParseError::LiteralOutOfRange { literal:  token.text.clone(),
                                    position: token.position.clone(), }
}
