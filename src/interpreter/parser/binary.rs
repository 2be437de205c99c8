use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Binary operator levels, loosest first.
///
/// Every level is left-associative. The operand of the last level is a unary
/// expression.
pub static PRECEDENCE: &[&[BinaryOperator]] =
    &[&[BinaryOperator::Or],
      &[BinaryOperator::And],
      &[BinaryOperator::BitOr],
      &[BinaryOperator::BitXor],
      &[BinaryOperator::BitAnd],
      &[BinaryOperator::Equal, BinaryOperator::NotEqual],
      &[BinaryOperator::Less,
        BinaryOperator::Greater,
        BinaryOperator::LessEqual,
        BinaryOperator::GreaterEqual],
      &[BinaryOperator::ShiftLeft, BinaryOperator::ShiftRight],
      &[BinaryOperator::Add, BinaryOperator::Sub],
      &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod]];

/// Parses a binary expression starting at the loosest level.
///
/// # Returns
/// - `Ok(Some(expr))` if an expression was parsed.
/// - `Ok(None)` if no operand starts at the current token.
pub fn parse_binary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    parse_level(tokens, 0)
}

/// Parses one precedence level.
///
/// The rule is: `level(n) := level(n + 1) (op(n) level(n + 1))*`, where the
/// level past the end of [`PRECEDENCE`] is a unary expression.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `level`: Index into [`PRECEDENCE`].
///
/// # Errors
/// `SubExpressionExpected` if an operator is not followed by an operand.
fn parse_level<'a, I>(tokens: &mut Peekable<I>, level: usize) -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a Token> + Clone
{
    let Some(operators) = PRECEDENCE.get(level) else {
        return parse_unary(tokens);
    };

    let Some(mut left) = parse_level(tokens, level + 1)? else {
        return Ok(None);
    };

    while let Some(token) = tokens.peek().copied()
          && let Some(op) = token_to_binary_operator(token)
          && operators.contains(&op)
    {
        tokens.next();
        let Some(right) = parse_level(tokens, level + 1)? else {
            let position = tokens.peek()
                                 .map_or_else(|| token.position.clone(), |t| t.position.clone());
            return Err(ParseError::SubExpressionExpected { position });
        };
        let position = left.position().clone();
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                position,
                                operator_position: token.position.clone() };
    }

    Ok(Some(left))
}

/// Maps a token to its corresponding binary operator.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token is a symbol spelling a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use trio::{
///     ast::BinaryOperator,
///     interpreter::{lexer::tokenize, parser::binary::token_to_binary_operator},
/// };
///
/// let tokens = tokenize("a >= b", "doc").unwrap();
/// assert_eq!(token_to_binary_operator(&tokens[1]), Some(BinaryOperator::GreaterEqual));
/// assert_eq!(token_to_binary_operator(&tokens[0]), None);
/// ```
#[must_use]
pub fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    if token.kind != TokenKind::Symbol {
        return None;
    }
    BinaryOperator::from_symbol(&token.text)
}
