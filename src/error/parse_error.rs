use thiserror::Error;

use crate::interpreter::lexer::token::Coordinate;

/// Represents all errors that can occur while building the AST.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot appear at this position.
    #[error("{coord}:unexpected symbol '{token}'")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// Location of the token.
        coord: Coordinate,
    },
    /// The token stream ended inside an unfinished construct.
    #[error("{coord}:unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        /// What the parser was waiting for.
        expected: String,
        /// Location of the end of input.
        coord:    Coordinate,
    },
    /// An argument list was terminated by the wrong token.
    #[error("{coord}:list not closed, found '{token}'")]
    ListNotClosed {
        /// The terminating token.
        token: String,
        /// Location of the terminating token.
        coord: Coordinate,
    },
    /// A matrix row started with a separator or was empty.
    #[error("{coord}:bad matrix row")]
    BadMatrix {
        /// Location of the row.
        coord: Coordinate,
    },
    /// Matrix rows have different lengths.
    #[error("{coord}:matrix is not rectangular: row {row} has {found} columns, expected {expected}")]
    MatrixNotRectangular {
        /// 0-based index of the first offending row.
        row:      usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        found:    usize,
        /// Location of the matrix.
        coord:    Coordinate,
    },
    /// An index composite had no or more than two components.
    #[error("{coord}:bad index: expected 1 or 2 components, found {count}")]
    BadIndex {
        /// Number of components written.
        count: usize,
        /// Location of the indexed identifier.
        coord: Coordinate,
    },
    /// A case alternative was not followed by `\when` or `\otherwise`.
    #[error("{coord}:expected \\when or \\otherwise, found '{token}'")]
    MalformedCase {
        /// The token found instead.
        token: String,
        /// Location of the token.
        coord: Coordinate,
    },
    /// A command argument did not start with the required bracket.
    #[error("{coord}:expected {expected} argument, found '{token}'")]
    ExpectedArgument {
        /// The opening bracket that was required.
        expected: String,
        /// The token found instead.
        token:    String,
        /// Location of the token.
        coord:    Coordinate,
    },
    /// A construct required a plain identifier.
    #[error("{coord}:expected identifier, found '{token}'")]
    ExpectedIdentifier {
        /// The token found instead.
        token: String,
        /// Location of the token.
        coord: Coordinate,
    },
}

impl ParseError {
    /// Location of the failure.
    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        match self {
            Self::UnexpectedToken { coord, .. }
            | Self::UnexpectedEndOfInput { coord, .. }
            | Self::ListNotClosed { coord, .. }
            | Self::BadMatrix { coord }
            | Self::MatrixNotRectangular { coord, .. }
            | Self::BadIndex { coord, .. }
            | Self::MalformedCase { coord, .. }
            | Self::ExpectedArgument { coord, .. }
            | Self::ExpectedIdentifier { coord, .. } => *coord,
        }
    }
}
