//! # trio
//!
//! trio is a small embeddable scripting language written in Rust.
//! Scripts are tokenized, parsed into an AST and run by a tree-walking
//! evaluator over booleans, integers, doubles, strings and lists. Hosts
//! extend the language by registering native functions and variables on a
//! [`Context`].

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Script,
    interpreter::{
        lexer::{tokenize, tokenize_lines},
        parser::{core::ParseResult, script::parse_script},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the expression, statement and script types that
/// represent source code as a tree. The AST is built by the parser and
/// traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// Every error carries the script name, line and column it refers to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and the value model.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

pub use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, DEFAULT_MAX_CALL_DEPTH, EvalResult},
            function::core::{Activation, Function, NativeFunction},
        },
        value::core::Value,
    },
};

/// Parses a script from source text.
///
/// # Parameters
/// - `source`: The script text. `\n` and `\r\n` line endings are accepted.
/// - `script_name`: Name used in diagnostics.
///
/// # Errors
/// The first lexical or syntax error.
///
/// # Examples
/// ```
/// use trio::parse;
///
/// let script = parse("var x = 1 + 2;", "demo").unwrap();
/// assert_eq!(script.statements.len(), 1);
///
/// let err = parse("var x = ;", "demo").unwrap_err();
/// assert_eq!(err.to_string(), "demo(1,9): expression expected");
/// ```
pub fn parse(source: &str, script_name: &str) -> ParseResult<Script> {
    let tokens = tokenize(source, script_name)?;
    parse_script(&tokens, script_name)
}

/// Parses a script given as separate lines.
///
/// # Errors
/// The first lexical or syntax error.
pub fn parse_lines(lines: &[&str], script_name: &str) -> ParseResult<Script> {
    let tokens = tokenize_lines(lines, script_name)?;
    parse_script(&tokens, script_name)
}

/// Parses and executes a script in one step.
///
/// # Returns
/// The value of a top-level `return`, if any.
///
/// # Errors
/// Returns an error if parsing fails or if any runtime error occurs.
///
/// # Examples
/// ```
/// use trio::{Context, Value, run};
///
/// let mut context = Context::new();
///
/// let result = run("var l = [1, 2]; l[0] = 5; return l[0] + count_of(l);", "demo", &mut context);
/// assert_eq!(result.unwrap(), Some(Value::Integer(7)));
///
/// // 'y' is not defined.
/// assert!(run("var x = y + 1;", "demo", &mut context).is_err());
/// ```
pub fn run(source: &str,
           script_name: &str,
           context: &mut Context)
           -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let script = parse(source, script_name)?;
    Ok(script.execute(context)?)
}
