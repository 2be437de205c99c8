use std::iter::Peekable;

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, starts_assignment},
            unary::parse_function_call,
            utils::{
                eat_keyword, eat_symbol, expect_keyword, expect_symbol, parse_identifier,
            },
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a variable declaration,
/// - an assignment,
/// - a function call,
/// - a `for`, `foreach`, `if` or `while` statement,
/// - a block,
/// - `break` or `continue`,
/// - a `return` statement.
///
/// Parsing is attempted in that order; the first matching construct is
/// returned.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a statement.
///
/// # Returns
/// - `Ok(Some(statement))` if a statement was parsed.
/// - `Ok(None)` if no statement starts at the current token.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(statement) = parse_variable_declaration(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_assignment(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_call(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_for(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_foreach(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_if(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_while(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_block(tokens)? {
        return Ok(Some(statement));
    }
    if let Some(statement) = parse_break_or_continue(tokens)? {
        return Ok(Some(statement));
    }
    parse_return(tokens)
}

/// Parses a statement where one is mandatory, e.g. a loop body.
///
/// # Errors
/// - `StatementExpected` if no statement starts at the current token.
/// - `UnexpectedEndOfFile` if the input is exhausted.
pub fn parse_required_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Token> + Clone
{
    match tokens.peek().copied() {
        None => Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() }),
        Some(token) => parse_statement(tokens)?.ok_or_else(|| {
                                                   ParseError::StatementExpected {
                                                       position: token.position.clone(),
                                                   }
                                               }),
    }
}

/// Parses `var name;` or `var name = value;`.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "var") else {
        return Ok(None);
    };
    let (name, _) = parse_identifier(tokens)?;

    let value = if eat_symbol(tokens, "=") {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    expect_symbol(tokens, ";")?;

    Ok(Some(Statement::VariableDeclaration { name, value, position }))
}

/// Parses `lvalue = value;`.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if !starts_assignment(tokens) {
        return Ok(None);
    }
    let expr = parse_expression(tokens)?;
    expect_symbol(tokens, ";")?;

    Ok(Some(expression_statement(expr)))
}

/// Parses `name(arguments);`.
fn parse_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(expr) = parse_function_call(tokens)? else {
        return Ok(None);
    };
    expect_symbol(tokens, ";")?;

    Ok(Some(expression_statement(expr)))
}

fn expression_statement(expr: Expr) -> Statement {
    let position = expr.position().clone();
    Statement::Expression { expr, position }
}

/// Parses a counting loop.
///
/// Syntax:
/// ```text
///     for ( [var name =] init ; condition ; step ) body
/// ```
/// With `var`, `name` is an induction variable that only exists inside the
/// loop.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "for") else {
        return Ok(None);
    };
    expect_symbol(tokens, "(")?;

    let variable = if eat_keyword(tokens, "var").is_some() {
        let (name, _) = parse_identifier(tokens)?;
        expect_symbol(tokens, "=")?;
        Some(name)
    } else {
        None
    };
    let init = parse_expression(tokens)?;
    expect_symbol(tokens, ";")?;
    let condition = parse_expression(tokens)?;
    expect_symbol(tokens, ";")?;
    let step = parse_expression(tokens)?;
    expect_symbol(tokens, ")")?;

    let body = parse_required_statement(tokens)?;

    Ok(Some(Statement::For { variable,
                             init,
                             condition,
                             step,
                             body: Box::new(body),
                             position }))
}

/// Parses `foreach ( [var] name in collection ) body`.
fn parse_foreach<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "foreach") else {
        return Ok(None);
    };
    expect_symbol(tokens, "(")?;
    eat_keyword(tokens, "var");
    let (variable, _) = parse_identifier(tokens)?;
    expect_keyword(tokens, "in")?;
    let collection = parse_expression(tokens)?;
    expect_symbol(tokens, ")")?;

    let body = parse_required_statement(tokens)?;

    Ok(Some(Statement::ForEach { variable,
                                 collection,
                                 body: Box::new(body),
                                 position }))
}

/// Parses `if ( condition ) statement [else statement]`.
///
/// `else if` chains fall out naturally, since the `else` branch is any
/// statement.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "if") else {
        return Ok(None);
    };
    expect_symbol(tokens, "(")?;
    let condition = parse_expression(tokens)?;
    expect_symbol(tokens, ")")?;

    let then_branch = parse_required_statement(tokens)?;
    let else_branch = if eat_keyword(tokens, "else").is_some() {
        Some(Box::new(parse_required_statement(tokens)?))
    } else {
        None
    };

    Ok(Some(Statement::If { condition,
                            then_branch: Box::new(then_branch),
                            else_branch,
                            position }))
}

/// Parses `while ( condition ) body`.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "while") else {
        return Ok(None);
    };
    expect_symbol(tokens, "(")?;
    let condition = parse_expression(tokens)?;
    expect_symbol(tokens, ")")?;

    let body = parse_required_statement(tokens)?;

    Ok(Some(Statement::While { condition,
                               body: Box::new(body),
                               position }))
}

fn parse_break_or_continue<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let statement = if let Some(position) = eat_keyword(tokens, "break") {
        Statement::Break { position }
    } else if let Some(position) = eat_keyword(tokens, "continue") {
        Statement::Continue { position }
    } else {
        return Ok(None);
    };
    expect_symbol(tokens, ";")?;

    Ok(Some(statement))
}

/// Parses `return;` or `return value;`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "return") else {
        return Ok(None);
    };
    if eat_symbol(tokens, ";") {
        return Ok(Some(Statement::Return { value: None,
                                           position }));
    }
    let value = parse_expression(tokens)?;
    expect_symbol(tokens, ";")?;

    Ok(Some(Statement::Return { value: Some(value),
                                position }))
}
