use std::iter::Peekable;

use crate::{
    ast::FunctionDef,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::ParseResult,
            utils::{eat_keyword, eat_symbol, expect_symbol, parse_identifier, peek_position},
        },
    },
};

/// Parses a function declaration.
///
/// Syntax:
/// ```text
///     func name(p1, p2, ...) { body }
/// ```
/// A trailing `...` makes the function variadic; it may only appear last.
///
/// # Returns
/// - `Ok(Some(def))` if a declaration was parsed.
/// - `Ok(None)` if the next token is not `func`.
///
/// # Errors
/// - `EllipsisNotLast` if anything follows `...` in the parameter list.
/// - `SymbolExpected` for a missing `(`, `,` or `{`.
/// - `IdentifierExpected` for a malformed name or parameter.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<FunctionDef>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(position) = eat_keyword(tokens, "func") else {
        return Ok(None);
    };
    let (name, _) = parse_identifier(tokens)?;
    expect_symbol(tokens, "(")?;

    let mut params = Vec::new();
    let mut variadic = false;
    let mut first = true;
    while !eat_symbol(tokens, ")") {
        if variadic {
            return Err(ParseError::EllipsisNotLast { position: peek_position(tokens) });
        }
        if !first {
            expect_symbol(tokens, ",")?;
        }
        first = false;

        if eat_symbol(tokens, "...") {
            variadic = true;
        } else {
            params.push(parse_identifier(tokens)?.0);
        }
    }

    let Some(body) = parse_block(tokens)? else {
        return Err(ParseError::SymbolExpected { symbol:   "{",
                                                position: peek_position(tokens), });
    };

    Ok(Some(FunctionDef { name,
                          params,
                          variadic,
                          body,
                          position }))
}
