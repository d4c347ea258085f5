use thiserror::Error;

use crate::interpreter::lexer::token::Coordinate;

/// Represents all errors that can occur while turning region text into
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A `{...}` attribute was required but missing or never closed.
    #[error("{coord}:expected {{...}} after {command}")]
    ExpectedAttribute {
        /// The command that takes the attribute.
        command: String,
        /// Where the attribute should start.
        coord:   Coordinate,
    },
    /// `\begin`/`\end` named an environment the language does not know.
    #[error("{coord}:unknown environment '{name}'")]
    UnknownEnvironment {
        /// Content of the attribute.
        name:  String,
        /// Location of the `\begin`/`\end` command.
        coord: Coordinate,
    },
    /// An identifier subscript was not written as `_\text{...}`.
    #[error("{coord}:expected \\text{{...}} in identifier subscript")]
    ExpectedText {
        /// Location of the subscript.
        coord: Coordinate,
    },
    /// A character that starts no token.
    #[error("{coord}:unexpected symbol '{symbol}'")]
    UnexpectedCharacter {
        /// The offending source text.
        symbol: String,
        /// Location of the symbol.
        coord:  Coordinate,
    },
    /// The bounds of a `\sum` or `\prod` could not be read.
    #[error("{coord}:malformed {command} bounds: {details}")]
    MalformedBounds {
        /// `\sum` or `\prod`.
        command: String,
        /// What was wrong.
        details: String,
        /// Location of the command.
        coord:   Coordinate,
    },
    /// A `\sum` was opened while a `\prod` on the same line was still open,
    /// or the reverse.
    #[error("{coord}:cannot nest {command} inside a pending {pending}")]
    MixedLoopNesting {
        /// The command being opened.
        command: String,
        /// The kind of loop already pending.
        pending: String,
        /// Location of the command.
        coord:   Coordinate,
    },
    /// The pending accumulator and iterator lists disagree when a loop is
    /// closed.
    #[error("{coord}:unbalanced loop expansion: {loops} loops, {accumulators} accumulators, \
             {iterators} iterators")]
    UnbalancedLoop {
        /// Pending loop count.
        loops:        usize,
        /// Pending accumulator tokens.
        accumulators: usize,
        /// Pending iterator tokens.
        iterators:    usize,
        /// Where the close was attempted.
        coord:        Coordinate,
    },
}

impl LexError {
    /// Location of the failure.
    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        match self {
            Self::ExpectedAttribute { coord, .. }
            | Self::UnknownEnvironment { coord, .. }
            | Self::ExpectedText { coord }
            | Self::UnexpectedCharacter { coord, .. }
            | Self::MalformedBounds { coord, .. }
            | Self::MixedLoopNesting { coord, .. }
            | Self::UnbalancedLoop { coord, .. } => *coord,
        }
    }
}
