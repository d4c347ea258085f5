/// Runtime values.
///
/// Defines [`core::Value`], the tagged variant shared by the evaluator and the
/// dimensional analyzer, together with matrices, function closures and the
/// [`core::Scope`] name table.
pub mod core;
/// SI dimension vectors.
///
/// Seven integer exponents over `m, kg, s, A, K, mol, cd` with the
/// arithmetic used by multiplication, division and powers, and their LaTeX
/// rendering.
pub mod dimension;
/// LaTeX rendering of values.
pub mod render;
