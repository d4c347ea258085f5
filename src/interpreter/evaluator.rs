/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations on evaluated operands:
/// arithmetic with dimension rules, matrix products, powers, comparisons
/// and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements the prefix operators: signs, `\abs`, `\neg` and
/// `\transpose`.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation dispatch, the runtime context with its
/// global scope, name resolution and the replacements captured from
/// placeholders and graphics.
pub mod core;

/// Conditionals, loops and case blocks.
pub mod control;

/// `\range` enumeration and `\graphic` sampling.
pub mod graphic;

/// Utility functions for evaluation.
///
/// Index evaluation and matrix element addressing shared by reads and
/// element assignment.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
