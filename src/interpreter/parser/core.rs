use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            binary::parse_binary,
            unary::parse_lvalue,
            utils::{eat_symbol, expect_symbol, peek_symbol},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. An assignment is detected
/// by looking ahead on a copy of the iterator for an lvalue followed by `=`;
/// otherwise the conditional expression chain is parsed.
///
/// Grammar: `expression := lvalue "=" expression | conditional`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of the expression.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// - `ExpressionExpected` if no expression starts at the current token.
/// - `UnexpectedEndOfFile` if the input is exhausted.
/// - Propagates errors from sub-expression parsing.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.peek().copied() {
        None => Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() }),
        Some(token) => {
            parse_optional_expression(tokens)?.ok_or_else(|| {
                                                  ParseError::ExpressionExpected {
                                                      position: token.position.clone(),
                                                  }
                                              })
        },
    }
}

/// Parses an expression if one starts at the current token.
///
/// # Returns
/// - `Ok(Some(expr))` if an expression was parsed.
/// - `Ok(None)` if the current token cannot begin an expression; nothing is
///   consumed in that case.
pub fn parse_optional_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if starts_assignment(tokens) {
        let Some(target) = parse_lvalue(tokens)? else {
            return Ok(None);
        };
        expect_symbol(tokens, "=")?;
        let value = parse_expression(tokens)?;
        let position = target.position().clone();

        return Ok(Some(Expr::Assign { target,
                                      value: Box::new(value),
                                      position }));
    }

    parse_conditional(tokens)
}

/// Returns `true` if the tokens ahead read `lvalue =`.
///
/// The lookahead runs on a clone, so the caller's iterator is untouched.
pub(in crate::interpreter::parser) fn starts_assignment<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut lookahead = tokens.clone();
    matches!(parse_lvalue(&mut lookahead), Ok(Some(_))) && peek_symbol(&mut lookahead, "=")
}

/// Parses a conditional expression `condition ? then : else`.
///
/// Both branches are conditional expressions themselves, which makes the
/// operator right-associative. Once `?` is seen both branches are required.
///
/// Grammar: `conditional := logical_or ("?" conditional ":" conditional)?`
fn parse_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(condition) = parse_binary(tokens)? else {
        return Ok(None);
    };
    if !eat_symbol(tokens, "?") {
        return Ok(Some(condition));
    }

    let then_branch = parse_required_conditional(tokens)?;
    expect_symbol(tokens, ":")?;
    let else_branch = parse_required_conditional(tokens)?;
    let position = condition.position().clone();

    Ok(Some(Expr::Conditional { condition: Box::new(condition),
                                then_branch: Box::new(then_branch),
                                else_branch: Box::new(else_branch),
                                position }))
}

fn parse_required_conditional<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.peek().copied() {
        None => Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() }),
        Some(token) => parse_conditional(tokens)?.ok_or_else(|| {
                                                     ParseError::ExpressionExpected {
                                                         position: token.position.clone(),
                                                     }
                                                 }),
    }
}
