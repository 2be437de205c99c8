/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between the integer and
/// floating-point types used by the interpreter without silent wrap-around or
/// saturation. Use these helpers wherever a script value crosses into a Rust
/// numeric type.
pub mod num;
