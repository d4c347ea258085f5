//! # texcalc
//!
//! texcalc evaluates computations written inside LaTeX documents. Code sits
//! in `\begin{preproc}` ... `\end{preproc}` regions and uses LaTeX spelling:
//! `\frac`, `\cdot`, `\sum`, `\prod`, `pmatrix` and SI units. Every
//! computation is dimension-checked before it runs, and results are written
//! back into `\placeholder{}` slots and `\graphic` payloads of the document.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{lexer::token::Coordinate, pipeline::Interpreter, value::core::Value},
};

/// Defines the syntax tree.
///
/// Every construct is a [`ast::Node`] told apart by its tag. Nodes carry
/// their source coordinate for error reporting and, for placeholders and
/// graphics, the byte range their value replaces.
pub mod ast;
/// Processes whole documents.
///
/// Finds the delimited regions, runs them in order through one
/// interpreter and splices the captured values back into the text.
pub mod document;
/// Provides unified error types for every phase.
///
/// Lexing, parsing, dimensional analysis and evaluation each have their own
/// error enum. All of them carry the document coordinate of the failure and
/// convert into the umbrella [`error::Error`].
pub mod error;
/// Orchestrates the execution of a region.
///
/// This module ties together lexing, parsing, dimensional analysis,
/// evaluation and value representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, evaluator,
///   and value types.
/// - Keeps global definitions alive from one region to the next.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

pub use document::{Config, process_document};

/// Runs a piece of source code as a single region and returns the value of
/// its last statement.
///
/// # Errors
/// Returns the first lexing, parsing, analysis or runtime error.
///
/// # Examples
/// ```
/// use texcalc::{evaluate, interpreter::value::core::Value};
///
/// assert_eq!(evaluate("3+4 \\cdot 2").unwrap(), Value::scalar(11.0));
///
/// // 'x' is not defined
/// assert!(evaluate("y := x + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Value, Error> {
    Interpreter::new().run_region(source, Coordinate::default()).map(|output| output.value)
}
