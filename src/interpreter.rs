/// The analyzer module checks dimensions before anything runs.
///
/// It walks the syntax tree once, assigning every node a provisional value
/// that records its dimension and shape. Loop bodies are visited a single
/// time, so a dimension error deep inside a long loop is reported without
/// running the loop.
///
/// # Responsibilities
/// - Infers the dimensions of identifiers from their first use.
/// - Records the signatures of user functions and checks calls against them.
/// - Rejects additions across dimensions, dimensional exponents and loop
///   bounds, and unknown names.
pub mod analyzer;
/// The evaluator module executes syntax trees and computes results.
///
/// The evaluator traverses the tree, performs arithmetic on dimensioned
/// numbers and matrices, manages the global and call scopes, and captures
/// the values of placeholders and graphics.
///
/// # Responsibilities
/// - Evaluates every node kind.
/// - Handles variables, functions, loops and conditionals.
/// - Reports runtime errors such as division by zero or bad indices.
pub mod evaluator;
/// The lexer module tokenizes region text.
///
/// The lexer reads the raw text of a region and produces tokens carrying
/// their tag, document coordinate and byte span. LaTeX commands map to
/// operators and keywords, SI unit symbols to dimensions, and `\sum` and
/// `\prod` are rewritten into loops.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Desugars sums, products, placeholders and rounding brackets.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser reads the token stream by precedence climbing and constructs
/// nodes for operators, calls, environments and control forms.
///
/// # Responsibilities
/// - Converts tokens into nodes.
/// - Validates the grammar, reporting errors with location info.
/// - Checks matrix literals for rectangularity.
pub mod parser;
/// Running one region through every phase.
///
/// [`pipeline::Interpreter`] owns the state that persists between regions.
pub mod pipeline;
/// The value module defines the data types of evaluation.
///
/// Numbers carry a magnitude and a vector of SI base-unit exponents.
/// Matrices, function closures and the provisional values of dimensional
/// analysis complete the model.
///
/// # Responsibilities
/// - Defines the `Value` enum and the matrix type.
/// - Implements dimension vectors and their arithmetic.
/// - Renders values as LaTeX.
pub mod value;
