/// Binary operator evaluation logic.
///
/// Holds the per-operator implementation tables, the type-driven dispatch over
/// them and the short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, logical NOT and bitwise complement.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the expression evaluator and the runtime context with its scope
/// arena.
pub mod core;

/// Loop execution.
///
/// Runs `while`, `for` and `foreach` statements, each in its own scope.
pub mod loops;

/// Statement execution.
///
/// Executes statements and reports how they finished through [`statement::Flow`].
pub mod statement;

/// Script execution.
pub mod script;

/// Utility functions for evaluation.
///
/// Reading and writing variables and list elements.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and native function calls, argument checking and
/// the built-in function table.
pub mod function;
