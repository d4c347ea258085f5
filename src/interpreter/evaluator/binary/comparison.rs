use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::type_error,
            core::{Context, EvalResult},
        },
        lexer::{tag::Tag, token::Coordinate},
        value::core::Value,
    },
};

/// Decides a comparison or logical operator on two magnitudes.
///
/// `\land` and `\lor` treat any non-zero magnitude as true.
///
/// ```
/// use texcalc::interpreter::{evaluator::binary::comparison::compare_magnitudes, lexer::tag::Tag};
///
/// assert!(compare_magnitudes(Tag::Leq, 2.0, 2.0));
/// assert!(!compare_magnitudes(Tag::And, 1.0, 0.0));
/// ```
#[must_use]
pub fn compare_magnitudes(tag: Tag, a: f64, b: f64) -> bool {
    match tag {
        Tag::Lt => a < b,
        Tag::Gt => a > b,
        Tag::Leq => a <= b,
        Tag::Geq => a >= b,
        Tag::Eq => a == b,
        Tag::Neq => a != b,
        Tag::And => a != 0.0 && b != 0.0,
        Tag::Or => a != 0.0 || b != 0.0,
        _ => false,
    }
}

/// Structural equality of two values.
///
/// Numbers must agree in dimension and magnitude, matrices in shape and
/// every element. Anything else is unequal.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(x, dx), Value::Number(y, dy)) => dx == dy && x == y,
        (Value::Matrix(a), Value::Matrix(b)) => {
            a.row_count() == b.row_count()
            && a.col_count() == b.col_count()
            && a.rows().iter().flatten().zip(b.rows().iter().flatten()).all(|(x, y)| values_equal(x, y))
        },
        _ => false,
    }
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `=` and `\neq` use structural equality and never fail. Ordering
    /// operators need two numbers of the same dimension.
    ///
    /// # Errors
    /// `DimensionMismatch` for ordering across dimensions, `TypeError` for
    /// ordering anything but numbers.
    pub fn eval_comparison(tag: Tag, left: &Value, right: &Value, coord: Coordinate) -> EvalResult<Value> {
        match tag {
            Tag::Eq => return Ok(Value::truth(values_equal(left, right))),
            Tag::Neq => return Ok(Value::truth(!values_equal(left, right))),
            _ => {},
        }

        let (Value::Number(x, dx), Value::Number(y, dy)) = (left, right) else {
            return Err(type_error(tag, left, right, coord));
        };
        if dx != dy {
            return Err(RuntimeError::DimensionMismatch { operation: tag.to_string(),
                                                         left: left.to_string(),
                                                         right: right.to_string(),
                                                         coord });
        }
        Ok(Value::truth(compare_magnitudes(tag, *x, *y)))
    }
}
