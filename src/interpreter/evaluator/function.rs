/// Built-in keyword functions and constants.
///
/// A table of the trigonometric, hyperbolic, logarithmic, rounding and
/// extremum functions with the dimension rule each one follows, plus the
/// named constants `\pi`, `\exp`, `\true` and `\false`.
pub mod builtin;

/// Calls of user functions and keywords.
///
/// Checks arity, binds arguments into the captured scope of the callee and
/// applies the dimension rules of built-ins.
pub mod core;
