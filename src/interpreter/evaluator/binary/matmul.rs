use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::{tag::Tag, token::Coordinate},
        value::core::{Matrix, Value},
    },
};

impl Context {
    /// Multiplies two matrices.
    ///
    /// When the inner dimensions agree this is the usual row-by-column
    /// product. Two row vectors or two column vectors of equal length
    /// produce their dot product as a number instead.
    ///
    /// # Errors
    /// `ShapeMismatch` when neither rule applies.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{
    ///     evaluator::core::Context,
    ///     lexer::token::Coordinate,
    ///     value::core::{Matrix, Value},
    /// };
    ///
    /// let row = Matrix::row_vector(vec![Value::scalar(1.0), Value::scalar(2.0)]).unwrap();
    /// let dot = Context::eval_matmul(&row, &row, Coordinate::default()).unwrap();
    /// assert_eq!(dot, Value::scalar(5.0));
    /// ```
    pub fn eval_matmul(a: &Matrix, b: &Matrix, coord: Coordinate) -> EvalResult<Value> {
        let (r1, c1) = (a.row_count(), a.col_count());
        let (r2, c2) = (b.row_count(), b.col_count());

        if c1 == r2 {
            return Self::contract(a, b, coord).map(Value::Matrix);
        }

        let dot = if r1 == 1 && r2 == 1 && c1 == c2 {
            Self::contract(a, &b.transpose(), coord)?
        } else if c1 == 1 && c2 == 1 && r1 == r2 {
            Self::contract(&a.transpose(), b, coord)?
        } else {
            return Err(RuntimeError::ShapeMismatch { operation: Tag::Mul.to_string(),
                                                     left: format!("{r1}x{c1}"),
                                                     right: format!("{r2}x{c2}"),
                                                     coord });
        };

        dot.get(0, 0).cloned().ok_or(RuntimeError::ShapeMismatch { operation: Tag::Mul.to_string(),
                                                                   left: format!("{r1}x{c1}"),
                                                                   right: format!("{r2}x{c2}"),
                                                                   coord })
    }

    /// Row-by-column product of matrices whose inner dimensions agree.
    fn contract(a: &Matrix, b: &Matrix, coord: Coordinate) -> EvalResult<Matrix> {
        let mut rows = Vec::with_capacity(a.row_count());
        for row in a.rows() {
            let mut cells = Vec::with_capacity(b.col_count());
            for col in 0..b.col_count() {
                let mut sum: Option<Value> = None;
                for (k, x) in row.iter().enumerate() {
                    let y = b.get(k, col).ok_or(RuntimeError::IndexOutOfRange { index: k,
                                                                                len: b.row_count(),
                                                                                coord })?;
                    let product = Self::eval_binary(Tag::Mul, x, y, coord)?;
                    sum = Some(match sum {
                                   Some(acc) => Self::eval_binary(Tag::Add, &acc, &product, coord)?,
                                   None => product,
                               });
                }
                cells.push(sum.unwrap_or_else(Value::zero));
            }
            rows.push(cells);
        }

        Matrix::new(rows).ok_or(RuntimeError::ShapeMismatch { operation: Tag::Mul.to_string(),
                                                              left: format!("{}x{}", a.row_count(), a.col_count()),
                                                              right: format!("{}x{}", b.row_count(), b.col_count()),
                                                              coord })
    }
}
