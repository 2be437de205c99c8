/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and executes
/// statements, manages the scoped variable and function tables, and calls
/// builtin, native and user-defined functions.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions and control flow.
/// - Reports runtime errors such as undefined names or invalid operations.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads source lines and produces a flat sequence of tokens, each
/// carrying its class, text and position.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Decodes string escapes and classifies numeric literals.
/// - Reports characters that do not begin any token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into expressions, statements and function declarations.
/// - Validates the grammar, reporting errors with location info.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum: booleans, integers, doubles, strings and lists.
/// - Implements equality, numeric promotion and textual rendering.
pub mod value;
