use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::type_error,
            core::{Context, EvalResult},
        },
        lexer::{tag::Tag, token::Coordinate},
        value::core::{Matrix, Value},
    },
};

impl Context {
    /// Element-wise `+` and `-` of two matrices of equal shape.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the shapes differ.
    /// - `TypeError` for `/` between matrices.
    pub fn eval_matrix_matrix(tag: Tag, a: &Matrix, b: &Matrix, coord: Coordinate) -> EvalResult<Value> {
        if !matches!(tag, Tag::Add | Tag::Sub) {
            return Err(type_error(tag, &Value::Matrix(a.clone()), &Value::Matrix(b.clone()), coord));
        }
        if (a.row_count(), a.col_count()) != (b.row_count(), b.col_count()) {
            return Err(RuntimeError::ShapeMismatch { operation: tag.to_string(),
                                                     left: format!("{}x{}", a.row_count(), a.col_count()),
                                                     right: format!("{}x{}", b.row_count(), b.col_count()),
                                                     coord });
        }

        a.try_zip(b, |x, y| Self::eval_binary(tag, x, y, coord)).map(Value::Matrix)
    }

    /// Scales every element of a matrix by a number: `A \cdot k`,
    /// `k \cdot A` and `A / k`.
    pub fn eval_matrix_scalar(tag: Tag, matrix: &Matrix, scalar: &Value, coord: Coordinate) -> EvalResult<Value> {
        if !matches!(tag, Tag::Mul | Tag::Div | Tag::Frac) {
            return Err(type_error(tag, &Value::Matrix(matrix.clone()), scalar, coord));
        }
        matrix.try_map(|x| Self::eval_binary(tag, x, scalar, coord)).map(Value::Matrix)
    }
}
