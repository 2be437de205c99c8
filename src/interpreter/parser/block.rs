use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::ParseResult,
            statement::parse_required_statement,
            utils::{eat_symbol, peek_symbol},
        },
    },
};

/// Parses a block of the form `{ statement* }`.
///
/// # Returns
/// - `Ok(Some(Statement::Block))` if a block was parsed.
/// - `Ok(None)` if the next token is not `{`.
///
/// # Errors
/// - `UnexpectedEndOfFile` if the closing `}` is missing.
/// - Propagates errors from the statements inside the block.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Statement>>
    where I: Iterator<Item = &'a Token> + Clone
{
    if !peek_symbol(tokens, "{") {
        return Ok(None);
    }
    let position = tokens.next()
                         .map_or_else(Position::unknown, |t| t.position.clone());

    let mut statements = Vec::new();
    while !eat_symbol(tokens, "}") {
        if tokens.peek().is_none() {
            return Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() });
        }
        statements.push(parse_required_statement(tokens)?);
    }

    Ok(Some(Statement::Block { statements, position }))
}
