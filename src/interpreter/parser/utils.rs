use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Token, TokenKind},
        parser::core::ParseResult,
    },
};

/// Returns the position of the next token, or an unknown position at the end
/// of input.
pub(in crate::interpreter::parser) fn peek_position<'a, I>(tokens: &mut Peekable<I>) -> Position
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().map_or_else(Position::unknown, |t| t.position.clone())
}

/// Returns `true` if the next token is `symbol`, without consuming it.
pub(in crate::interpreter::parser) fn peek_symbol<'a, I>(tokens: &mut Peekable<I>,
                                                         symbol: &str)
                                                         -> bool
    where I: Iterator<Item = &'a Token>
{
    tokens.peek().is_some_and(|t| t.is_symbol(symbol))
}

/// Consumes the next token if it is `symbol`.
///
/// # Returns
/// `true` if the symbol was consumed.
pub(in crate::interpreter::parser) fn eat_symbol<'a, I>(tokens: &mut Peekable<I>,
                                                        symbol: &str)
                                                        -> bool
    where I: Iterator<Item = &'a Token>
{
    tokens.next_if(|t| t.is_symbol(symbol)).is_some()
}

/// Consumes the next token if it is `keyword`, returning its position.
pub(in crate::interpreter::parser) fn eat_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                         keyword: &str)
                                                         -> Option<Position>
    where I: Iterator<Item = &'a Token>
{
    tokens.next_if(|t| t.is_keyword(keyword))
          .map(|t| t.position.clone())
}

/// Consumes `symbol` or fails.
///
/// # Errors
/// - `UnexpectedEndOfFile` if the input is exhausted.
/// - `SymbolExpected` if a different token follows.
pub(in crate::interpreter::parser) fn expect_symbol<'a, I>(tokens: &mut Peekable<I>,
                                                           symbol: &'static str)
                                                           -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(t) if t.is_symbol(symbol) => {
            tokens.next();
            Ok(())
        },
        Some(t) => Err(ParseError::SymbolExpected { symbol,
                                                    position: t.position.clone() }),
        None => Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() }),
    }
}

/// Consumes `keyword` or fails.
///
/// # Errors
/// - `UnexpectedEndOfFile` if the input is exhausted.
/// - `KeywordExpected` if a different token follows.
pub(in crate::interpreter::parser) fn expect_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                            keyword: &'static str)
                                                            -> ParseResult<()>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(t) if t.is_keyword(keyword) => {
            tokens.next();
            Ok(())
        },
        Some(t) => Err(ParseError::KeywordExpected { keyword,
                                                     position: t.position.clone() }),
        None => Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() }),
    }
}

/// Parses a plain identifier and returns its name and position.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<(String, Position)>
    where I: Iterator<Item = &'a Token>
{
    match tokens.peek().copied() {
        Some(t) if t.kind == TokenKind::Identifier => {
            tokens.next();
            Ok((t.text.clone(), t.position.clone()))
        },
        Some(t) => Err(ParseError::IdentifierExpected { position: t.position.clone() }),
        None => Err(ParseError::UnexpectedEndOfFile { position: Position::unknown() }),
    }
}

/// Parses a comma-separated list of items until a closing symbol.
///
/// This utility is shared by list literals and function argument lists. The
/// opening symbol must already be consumed. An immediately encountered closing
/// symbol produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing symbol.
/// - `parse_item`: Function used to parse each element.
/// - `closing`: The symbol that terminates the list (e.g. `]` or `)`).
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, if neither `,` nor the
/// closing symbol follows an item, or if the input ends first.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &'static str)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Token>
{
    let mut items = Vec::new();
    if eat_symbol(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if eat_symbol(tokens, ",") {
            continue;
        }
        expect_symbol(tokens, closing)?;
        break;
    }
    Ok(items)
}
