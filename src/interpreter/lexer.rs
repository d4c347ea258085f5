/// The region lexer.
///
/// Wraps the `logos` lexemes with the state the language needs: balanced
/// attribute reading, brace roles for `\floor{...}`/`\ceil{...}` and the
/// pending sum/product loops closed at the end of a line.
pub mod core;
/// Sum/product and placeholder desugaring.
///
/// Expands `\sum_{i=1}^{n}` and `\prod_{i=1}^{n}` into accumulator loops
/// built from primitive tokens, and `\placeholder[unit]{...}` into a
/// division the evaluator can solve.
mod desugar;
/// Context-free lexemes generated by `logos`.
pub mod raw;
/// The tag catalog: token kinds, precedences, close tags and unary/binary
/// alternates, plus the backslash keyword table.
pub mod tag;
/// Tokens, document coordinates and the offset to coordinate index.
pub mod token;
