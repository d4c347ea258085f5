use thiserror::Error;

use crate::interpreter::lexer::token::Coordinate;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read a name bound in neither the local nor the global scope.
    #[error("{coord}:undefined variable reference '{name}'")]
    UndefinedVariable {
        /// The name.
        name:  String,
        /// Location of the reference.
        coord: Coordinate,
    },
    /// Division by a zero scalar.
    #[error("{coord}:division by zero")]
    DivisionByZero {
        /// Location of the division.
        coord: Coordinate,
    },
    /// A matrix index below zero.
    #[error("{coord}:negative index {index}")]
    NegativeIndex {
        /// The index as written.
        index: String,
        /// Location of the indexed identifier.
        coord: Coordinate,
    },
    /// A matrix index past the last row or column.
    #[error("{coord}:index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The 0-based index.
        index: usize,
        /// The length of the indexed axis.
        len:   usize,
        /// Location of the indexed identifier.
        coord: Coordinate,
    },
    /// A single index was applied to a matrix that is not a vector.
    #[error("{coord}:cannot use a vector index on a {rows}x{cols} matrix")]
    VectorIndexOnMatrix {
        /// Row count.
        rows:  usize,
        /// Column count.
        cols:  usize,
        /// Location of the indexed identifier.
        coord: Coordinate,
    },
    /// `\range` produced no values.
    #[error("{coord}:empty range")]
    EmptyRange {
        /// Location of the range.
        coord: Coordinate,
    },
    /// `\range` was given a zero or negative step.
    #[error("{coord}:range step must be positive, found {step}")]
    InvalidStep {
        /// Rendered step.
        step:  String,
        /// Location of the range.
        coord: Coordinate,
    },
    /// Operands of an operation carry incompatible dimensions.
    #[error("{coord}:dimension mismatch in {operation}: {left} and {right}")]
    DimensionMismatch {
        /// Display name of the operation.
        operation: String,
        /// Rendered left operand.
        left:      String,
        /// Rendered right operand.
        right:     String,
        /// Location of the operation.
        coord:     Coordinate,
    },
    /// Matrix operands have incompatible shapes.
    #[error("{coord}:matrix dimensions mismatch in {operation}: {left} and {right}")]
    ShapeMismatch {
        /// Display name of the operation.
        operation: String,
        /// Left shape as `rows x cols`.
        left:      String,
        /// Right shape as `rows x cols`.
        right:     String,
        /// Location of the operation.
        coord:     Coordinate,
    },
    /// A value had an unexpected or incompatible type.
    #[error("{coord}:type error: {details}")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// Location of the operation.
        coord:   Coordinate,
    },
    /// A dimensional base raised to a non-integer power, or a dimensional
    /// exponent.
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
    /// A built-in that needs a pure number received a quantity.
    #[error("{coord}:{name} expects a dimensionless argument, found {found}")]
    DimensionalArgument {
        /// The built-in.
        name:  String,
        /// Rendered argument.
        found: String,
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
    /// Wrong number of arguments for a call.
    #[error("{coord}:'{name}' expects {expected} arguments, found {found}")]
    WrongArgumentCount {
        /// The callee.
        name:     String,
        /// Expected count.
        expected: usize,
        /// Supplied count.
        found:    usize,
        /// Location of the call.
        coord:    Coordinate,
    },
    /// No case alternative matched and there is no `\otherwise`.
    #[error("{coord}:no case alternative matches")]
    NoMatchingCase {
        /// Location of the case block.
        coord: Coordinate,
    },
    /// `\graphic` needs exactly one `\range` field.
    #[error("{coord}:graphic needs exactly one range field, found {found}")]
    RangeFieldCount {
        /// Number of range fields.
        found: usize,
        /// Location of the graphic.
        coord: Coordinate,
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

impl RuntimeError {
    /// Location of the failure.
    #[must_use]
    pub const fn coord(&self) -> Coordinate {
        match self {
            Self::UndefinedVariable { coord, .. }
            | Self::DivisionByZero { coord }
            | Self::NegativeIndex { coord, .. }
            | Self::IndexOutOfRange { coord, .. }
            | Self::VectorIndexOnMatrix { coord, .. }
            | Self::EmptyRange { coord }
            | Self::InvalidStep { coord, .. }
            | Self::DimensionMismatch { coord, .. }
            | Self::ShapeMismatch { coord, .. }
            | Self::TypeError { coord, .. }
            | Self::InvalidExponent { coord, .. }
            | Self::ExponentOverflow { coord, .. }
            | Self::DimensionalArgument { coord, .. }
            | Self::UnknownKeyword { coord, .. }
            | Self::WrongArgumentCount { coord, .. }
            | Self::NoMatchingCase { coord }
            | Self::RangeFieldCount { coord, .. }
            | Self::InvalidAssignment { coord, .. }
            | Self::UnexpectedNode { coord, .. } => *coord,
        }
    }
}
