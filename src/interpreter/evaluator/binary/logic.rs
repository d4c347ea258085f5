use crate::interpreter::{
    evaluator::{
        binary::{comparison::compare_magnitudes, core::type_error},
        core::{Context, EvalResult},
    },
    lexer::{tag::Tag, token::Coordinate},
    value::core::Value,
};

impl Context {
    /// Evaluates `\land` and `\lor` on the truthiness of two numbers.
    pub fn eval_logic(tag: Tag, left: &Value, right: &Value, coord: Coordinate) -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(x, _), Value::Number(y, _)) => Ok(Value::truth(compare_magnitudes(tag, *x, *y))),
            _ => Err(type_error(tag, left, right, coord)),
        }
    }
}
