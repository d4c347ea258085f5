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

impl Context {
    /// Evaluates arithmetic between two numbers.
    ///
    /// Addition and subtraction require equal dimensions. Multiplication adds
    /// the dimension vectors, division subtracts them.
    ///
    /// # Errors
    /// - `DimensionMismatch` for `+` or `-` across dimensions.
    /// - `DivisionByZero` for a zero divisor.
    /// - `ExponentOverflow` when a unit exponent leaves the `i32` range.
    pub fn eval_scalar_op(tag: Tag, left: &Value, right: &Value, coord: Coordinate) -> EvalResult<Value> {
        let (Value::Number(x, dx), Value::Number(y, dy)) = (left, right) else {
            return Err(type_error(tag, left, right, coord));
        };

        let overflow = || RuntimeError::ExponentOverflow { operation: tag.to_string(),
                                                           coord };

        match tag {
            Tag::Add | Tag::Sub => {
                if dx != dy {
                    return Err(RuntimeError::DimensionMismatch { operation: tag.to_string(),
                                                                 left: left.to_string(),
                                                                 right: right.to_string(),
                                                                 coord });
                }
                Ok(Value::Number(if tag == Tag::Add { x + y } else { x - y }, *dx))
            },
            Tag::Mul => Ok(Value::Number(x * y, dx.checked_add(*dy).ok_or_else(overflow)?)),
            Tag::Div | Tag::Frac => {
                if *y == 0.0 {
                    return Err(RuntimeError::DivisionByZero { coord });
                }
                Ok(Value::Number(x / y, dx.checked_sub(*dy).ok_or_else(overflow)?))
            },
            _ => Err(type_error(tag, left, right, coord)),
        }
    }
}
