/// Runtime values.
///
/// Defines the `Value` enum with its equality, promotion and rendering rules.
/// Lists are shared by reference, so assigning a list to a second variable
/// and modifying one of them is visible through both.
pub mod core;
