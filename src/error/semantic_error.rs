use thiserror::Error;

use crate::interpreter::lexer::token::Coordinate;

/// Represents all errors found by dimensional analysis before execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Operands of an operation carry incompatible dimensions or shapes.
    #[error("{coord}:dimension mismatch in {operation}: {left} and {right}")]
    DimensionMismatch {
        /// Display name of the operation.
        operation: String,
        /// Rendered provisional left operand.
        left:      String,
        /// Rendered provisional right operand.
        right:     String,
        /// Location of the operation.
        coord:     Coordinate,
    },
    /// An operation was applied to values of the wrong kind.
    #[error("{coord}:invalid operands for {operation}: {details}")]
    InvalidOperands {
        /// Display name of the operation.
        operation: String,
        /// Description of the operands.
        details:   String,
        /// Location of the operation.
        coord:     Coordinate,
    },
    /// An identifier was used before any definition.
    #[error("{coord}:undefined identifier '{name}'")]
    UndefinedIdentifier {
        /// The identifier.
        name:  String,
        /// Location of the use.
        coord: Coordinate,
    },
    /// A function was called before any definition.
    #[error("{coord}:undefined function '{name}'")]
    UndefinedFunction {
        /// The function name.
        name:  String,
        /// Location of the call.
        coord: Coordinate,
    },
    /// A backslash keyword names neither a constant nor a built-in.
    #[error("{coord}:keyword '{name}' is not defined")]
    UnknownKeyword {
        /// The keyword.
        name:  String,
        /// Location of the keyword.
        coord: Coordinate,
    },
    /// A call passed the wrong number of arguments.
    #[error("{coord}:'{name}' expects {expected} arguments, found {found}")]
    ArityMismatch {
        /// The callee.
        name:     String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        found:    usize,
        /// Location of the call.
        coord:    Coordinate,
    },
    /// An argument disagrees with the declared parameter.
    #[error("{coord}:argument {index} of '{name}' is {found}, expected {expected}")]
    ArgumentMismatch {
        /// The callee.
        name:     String,
        /// 1-based argument position.
        index:    usize,
        /// Rendered declared parameter.
        expected: String,
        /// Rendered argument.
        found:    String,
        /// Location of the call.
        coord:    Coordinate,
    },
    /// A dimensional base was raised to something other than an integer
    /// of at least one, or the exponent itself carried a dimension.
    #[error("{coord}:invalid exponent {exponent} for base {base}")]
    InvalidExponent {
        /// Rendered base.
        base:     String,
        /// Rendered exponent.
        exponent: String,
        /// Location of the power.
        coord:    Coordinate,
    },
    /// A unit exponent left the representable range.
    #[error("{coord}:unit exponent out of range in {operation}")]
    ExponentOverflow {
        /// Display name of the operation.
        operation: String,
        /// Location of the operation.
        coord:     Coordinate,
    },
    /// Bounds of a sum or product are not dimensionless numbers.
    #[error("{coord}:loop bounds must be dimensionless numbers, found {lower} and {upper}")]
    DimensionalBound {
        /// Rendered lower bound.
        lower: String,
        /// Rendered upper bound.
        upper: String,
        /// Location of the loop.
        coord: Coordinate,
    },
    /// No case alternative matched and there is no `\otherwise`.
    #[error("{coord}:no case alternative matches")]
    NoMatchingCase {
        /// Location of the case block.
        coord: Coordinate,
    },
    /// An operand has no known value.
    #[error("{coord}:undefined value in {operation}")]
    UndefinedValue {
        /// Display name of the operation.
        operation: String,
        /// Location of the operation.
        coord:     Coordinate,
    },
    /// The left side of `:=` cannot be assigned.
    #[error("{coord}:cannot assign to {target}")]
    InvalidAssignment {
        /// Display name of the target.
        target: String,
        /// Location of the assignment.
        coord:  Coordinate,
    },
    /// A node that cannot appear in a finished AST.
    #[error("{coord}:unexpected {tag}")]
    UnexpectedNode {
        /// Display name of the node.
        tag:   String,
        /// Location of the node.
        coord: Coordinate,
    },
}

impl SemanticError {
    /// Location of the failure.
    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        match self {
            Self::DimensionMismatch { coord, .. }
            | Self::InvalidOperands { coord, .. }
            | Self::UndefinedIdentifier { coord, .. }
            | Self::UndefinedFunction { coord, .. }
            | Self::UnknownKeyword { coord, .. }
            | Self::ArityMismatch { coord, .. }
            | Self::ArgumentMismatch { coord, .. }
            | Self::InvalidExponent { coord, .. }
            | Self::ExponentOverflow { coord, .. }
            | Self::DimensionalBound { coord, .. }
            | Self::NoMatchingCase { coord }
            | Self::UndefinedValue { coord, .. }
            | Self::InvalidAssignment { coord, .. }
            | Self::UnexpectedNode { coord, .. } => *coord,
        }
    }
}
