/// Arithmetic, comparison and prefix operators.
pub mod binary;
/// Blocks, case blocks, conditionals, loops and ranges.
pub mod control;
/// The analyzer state, the node dispatch and name resolution.
///
/// [`core::Analyzer`] keeps the provisional values of global identifiers
/// and the signatures of user functions across regions.
pub mod core;
/// Assignments, function definitions, calls, keywords and graphics.
pub mod function;
