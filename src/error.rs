/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unknown characters, malformed literals and grammar violations.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a script executes, such
/// as undefined names, type mismatches and misplaced `break` statements.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
