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
    util::num::f64_to_i32_checked,
};

impl Context {
    /// Raises a number to a dimensionless power.
    ///
    /// A base with a dimension accepts only integer exponents of at least
    /// one; the dimension is multiplied by the exponent.
    ///
    /// # Errors
    /// `InvalidExponent` for a dimensional exponent, or a dimensional base
    /// with a fractional or non-positive exponent, or one that drives a unit
    /// exponent out of the `i32` range.
    pub fn eval_pow(base: &Value, exponent: &Value, coord: Coordinate) -> EvalResult<Value> {
        let (Value::Number(x, dx), Value::Number(p, dp)) = (base, exponent) else {
            return Err(type_error(Tag::Pow, base, exponent, coord));
        };
        let invalid = || RuntimeError::InvalidExponent { base: base.to_string(),
                                                         exponent: exponent.to_string(),
                                                         coord };

        if !dp.is_dimensionless() {
            return Err(invalid());
        }
        if dx.is_dimensionless() {
            return Ok(Value::Number(x.powf(*p), *dx));
        }

        let power = f64_to_i32_checked(*p, invalid())?;
        if power < 1 {
            return Err(invalid());
        }
        Ok(Value::Number(x.powi(power), dx.checked_scale(power).ok_or_else(invalid)?))
    }
}
