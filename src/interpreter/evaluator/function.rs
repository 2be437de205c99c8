/// Built-in function implementations.
///
/// Contains the functions every script can call without declaring them:
/// `to_string`, `to_int` and `count_of`.
pub mod builtin;

/// Function values and call machinery.
///
/// Defines native and user-defined functions, the activation handed to native
/// code, and argument binding.
pub mod core;
