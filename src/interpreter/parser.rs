/// Infix operators.
///
/// Builds binary nodes, applying the left or right associativity recorded
/// in the tag catalog.
pub mod binary;
/// Statement sequences, case alternatives and matrix rows.
pub mod block;
/// Core entry points of the parser.
///
/// Provides [`core::parse_program`] for whole regions and
/// [`core::parse_expression`], the precedence-climbing loop every other
/// parsing function builds on.
pub mod core;
/// Terms in prefix position.
///
/// Literals, identifiers with index or call suffixes, bracketed groups,
/// environments, commands with arguments, loops and prefix operators.
pub mod unary;
/// Shared helpers: argument lists, single command arguments and skipped
/// payload groups.
pub mod utils;
