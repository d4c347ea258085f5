/// Lexing errors.
///
/// Malformed attributes, unknown environments, unrecognized characters and
/// broken sum/product expansions.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the AST: unexpected
/// tokens, unclosed lists and brackets, non-rectangular matrices, bad index
/// arity and malformed case alternatives.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero, out-of-range indices, undefined variables, empty ranges
/// or operations on values of the wrong type.
pub mod runtime_error;
/// Dimensional analysis errors.
pub mod semantic_error;

use thiserror::Error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;

use crate::interpreter::lexer::token::Coordinate;

/// Any error that aborts a region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Location of the failure.
    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        match self {
            Self::Lex(e) => e.coord(),
            Self::Parse(e) => e.coord(),
            Self::Semantic(e) => e.coord(),
            Self::Runtime(e) => e.coord(),
        }
    }
}

/// An error that aborts a whole document, reported as
/// `<document>:<line>:<col>:<message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A region failed in one of the interpreter phases.
    #[error("{document}:{source}")]
    Region {
        /// Name of the document.
        document: String,
        /// The phase error.
        source:   Error,
    },
    /// A region was opened but never closed.
    #[error("{document}:{coord}:unterminated region, expected {marker}")]
    UnterminatedRegion {
        /// Name of the document.
        document: String,
        /// The missing end marker.
        marker:   String,
        /// Location of the begin marker.
        coord:    Coordinate,
    },
}
