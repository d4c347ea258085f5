use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::{tag::Tag, token::Coordinate},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand types. Arithmetic chooses between scalar,
    /// element-wise matrix and matrix-product evaluation. Power calls
    /// `eval_pow`. Comparisons use `eval_comparison`, `\land` and `\lor` call
    /// `eval_logic`.
    ///
    /// # Parameters
    /// - `tag`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `coord`: Position for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{
    ///     evaluator::core::Context,
    ///     lexer::{tag::Tag, token::Coordinate},
    ///     value::{core::Value, dimension::Dimension},
    /// };
    ///
    /// let metre = Dimension::from_unit("m").unwrap();
    /// let left = Value::Number(3.0, metre);
    /// let right = Value::Number(4.0, metre);
    ///
    /// let result = Context::eval_binary(Tag::Mul, &left, &right, Coordinate::default());
    /// assert_eq!(result.unwrap(), Value::Number(12.0, metre.checked_scale(2).unwrap()));
    /// ```
    pub fn eval_binary(tag: Tag, left: &Value, right: &Value, coord: Coordinate) -> EvalResult<Value> {
        match tag {
            Tag::Add | Tag::Sub | Tag::Mul | Tag::Div | Tag::Frac => match (left, right) {
                (Value::Number(..), Value::Number(..)) => Self::eval_scalar_op(tag, left, right, coord),
                (Value::Matrix(a), Value::Matrix(b)) if tag == Tag::Mul => Self::eval_matmul(a, b, coord),
                (Value::Matrix(a), Value::Matrix(b)) => Self::eval_matrix_matrix(tag, a, b, coord),
                (Value::Matrix(a), Value::Number(..)) => Self::eval_matrix_scalar(tag, a, right, coord),
                (Value::Number(..), Value::Matrix(b)) if tag == Tag::Mul => {
                    Self::eval_matrix_scalar(tag, b, left, coord)
                },
                _ => Err(type_error(tag, left, right, coord)),
            },
            Tag::Pow => Self::eval_pow(left, right, coord),
            Tag::Lt | Tag::Gt | Tag::Leq | Tag::Geq | Tag::Eq | Tag::Neq => {
                Self::eval_comparison(tag, left, right, coord)
            },
            Tag::And | Tag::Or => Self::eval_logic(tag, left, right, coord),
            _ => Err(RuntimeError::UnexpectedNode { tag: tag.to_string(),
                                                    coord }),
        }
    }
}

/// A `TypeError` naming the operator and both operand kinds.
pub(crate) fn type_error(tag: Tag, left: &Value, right: &Value, coord: Coordinate) -> RuntimeError {
    RuntimeError::TypeError { details: format!("{tag} is not defined for a {} and a {}", left.kind(), right.kind()),
                              coord }
}
