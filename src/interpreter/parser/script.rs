use std::rc::Rc;

use crate::{
    ast::{FunctionDef, Script, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, function::parse_function, statement::parse_statement},
    },
};

/// Parses a whole token sequence into a [`Script`].
///
/// Top-level items are statements and `func` declarations, in any order.
///
/// # Parameters
/// - `tokens`: All tokens of the script.
/// - `script_name`: Name stored in the script for diagnostics.
///
/// # Errors
/// `UnexpectedToken` for a token that starts neither a statement nor a
/// declaration, plus any error raised while parsing an item.
/// `UnexpectedEndOfFile` is reported at the last token of the script.
pub fn parse_script(tokens: &[Token], script_name: &str) -> ParseResult<Script> {
    let (statements, functions) = parse_items(tokens).map_err(|e| at_last_token(e, tokens))?;

    log::debug!("parsed '{script_name}': {} statements, {} functions",
                statements.len(),
                functions.len());

    Ok(Script { name: Rc::from(script_name),
                statements,
                functions })
}

fn at_last_token(error: ParseError, tokens: &[Token]) -> ParseError {
    match (error, tokens.last()) {
        (ParseError::UnexpectedEndOfFile { .. }, Some(last)) => {
            ParseError::UnexpectedEndOfFile { position: last.position.clone() }
        },
        (error, _) => error,
    }
}

fn parse_items(tokens: &[Token]) -> ParseResult<(Vec<Statement>, Vec<Rc<FunctionDef>>)> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();
    let mut functions = Vec::new();

    while let Some(&token) = iter.peek() {
        if let Some(statement) = parse_statement(&mut iter)? {
            statements.push(statement);
            continue;
        }
        if let Some(function) = parse_function(&mut iter)? {
            functions.push(Rc::new(function));
            continue;
        }
        return Err(ParseError::UnexpectedToken { token:    token.text.clone(),
                                                 position: token.position.clone(), });
    }

    Ok((statements, functions))
}
