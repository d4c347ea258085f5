use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::token::Coordinate,
        value::{
            core::{Matrix, Scope, Value},
            render::format_number,
        },
    },
    util::num::f64_to_usize_truncated,
};

impl Context {
    /// Evaluates index expressions into 0-based positions.
    ///
    /// Fractional indices are truncated toward zero.
    ///
    /// # Errors
    /// - `NegativeIndex` for an index below zero.
    /// - `TypeError` for an index that is not a number.
    pub(crate) fn eval_indices(&mut self, fields: &[Node], mut scope: Option<&mut Scope>) -> EvalResult<Vec<usize>> {
        let mut indices = Vec::with_capacity(fields.len());
        for field in fields {
            let index = match self.eval(field, scope.as_deref_mut())? {
                Value::Number(x, _) if x < 0.0 => {
                    return Err(RuntimeError::NegativeIndex { index: format_number(x),
                                                             coord: field.coord, });
                },
                Value::Number(x, _) => f64_to_usize_truncated(x,
                                                              RuntimeError::TypeError { details: format!("invalid index {}", format_number(x)),
                                                                                        coord:   field.coord, })?,
                other => {
                    return Err(RuntimeError::TypeError { details: format!("cannot index with a {}", other.kind()),
                                                         coord:   field.coord, });
                },
            };
            indices.push(index);
        }
        Ok(indices)
    }

    /// Maps one or two indices to a `(row, col)` position.
    ///
    /// A single index addresses the elements of a row or column vector.
    /// Two indices are row and column.
    ///
    /// # Errors
    /// - `VectorIndexOnMatrix` for a single index on a matrix with more than
    ///   one row and column.
    /// - `IndexOutOfRange` for a position outside the matrix.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{
    ///     evaluator::core::Context,
    ///     lexer::token::Coordinate,
    ///     value::core::{Matrix, Value},
    /// };
    ///
    /// let column = Matrix::new(vec![vec![Value::scalar(1.0)], vec![Value::scalar(2.0)]]).unwrap();
    /// assert_eq!(Context::address(&column, &[1], Coordinate::default()), Ok((1, 0)));
    /// assert!(Context::address(&column, &[2], Coordinate::default()).is_err());
    /// ```
    pub fn address(matrix: &Matrix, indices: &[usize], coord: Coordinate) -> EvalResult<(usize, usize)> {
        let (rows, cols) = (matrix.row_count(), matrix.col_count());

        let (row, col) = match *indices {
            [i] if rows == 1 => (0, i),
            [i] if cols == 1 => (i, 0),
            [_] => return Err(RuntimeError::VectorIndexOnMatrix { rows, cols, coord }),
            [r, c] => (r, c),
            _ => {
                return Err(RuntimeError::TypeError { details: format!("expected one or two indices, found {}", indices.len()),
                                                     coord });
            },
        };

        if row >= rows {
            return Err(RuntimeError::IndexOutOfRange { index: row,
                                                       len: rows,
                                                       coord });
        }
        if col >= cols {
            return Err(RuntimeError::IndexOutOfRange { index: col,
                                                       len: cols,
                                                       coord });
        }
        Ok((row, col))
    }
}
