/// Binary expression parsing.
///
/// Walks the operator precedence table, building left-associative binary
/// operation nodes.
pub mod binary;
/// Block parsing.
///
/// Parses `{ ... }` statement blocks.
pub mod block;
/// Core parsing entry points.
///
/// Contains the expression entry point, assignment detection and the
/// conditional operator.
pub mod core;
/// Function declaration parsing.
pub mod function;
/// Top-level script parsing.
pub mod script;
/// Statement parsing.
///
/// Parses declarations, assignments, calls, loops, conditionals and control
/// transfer statements.
pub mod statement;
/// Prefix operators and primary expressions.
///
/// Parses unary operators, literals, variables, indexing, calls, list literals
/// and parenthesised expressions.
pub mod unary;
/// Parser helpers.
///
/// Utility functions shared by the parser modules, such as symbol matching
/// and comma-separated lists.
pub mod utils;
