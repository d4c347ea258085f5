use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, required},
        lexer::{tag::Tag, token::Coordinate},
        value::core::{Scope, Value},
    },
};

impl Context {
    /// Evaluates the operand of a prefix node and applies the operator.
    pub(crate) fn eval_prefix(&mut self, node: &Node, scope: Option<&mut Scope>) -> EvalResult<Value> {
        let operand = required(node, node.rhs().or_else(|| node.lhs()))?;
        let value = self.eval(operand, scope)?;
        Self::eval_unary(node.tag, &value, node.coord)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `+`: the value itself.
    /// - `-` and `\abs`: negation and absolute value of numbers, element-wise
    ///   on matrices.
    /// - `\neg`: true for zero, false otherwise.
    /// - `\transpose`: transposes a matrix and leaves a number as is.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{
    ///     evaluator::core::Context,
    ///     lexer::{tag::Tag, token::Coordinate},
    ///     value::core::Value,
    /// };
    ///
    /// let v = Context::eval_unary(Tag::USub, &Value::scalar(5.0), Coordinate::default()).unwrap();
    /// assert_eq!(v, Value::scalar(-5.0));
    ///
    /// let v = Context::eval_unary(Tag::Not, &Value::scalar(0.0), Coordinate::default()).unwrap();
    /// assert_eq!(v, Value::truth(true));
    /// ```
    pub fn eval_unary(tag: Tag, value: &Value, coord: Coordinate) -> EvalResult<Value> {
        match (tag, value) {
            (Tag::UAdd, v) => Ok(v.clone()),
            (Tag::USub, Value::Number(x, d)) => Ok(Value::Number(-x, *d)),
            (Tag::Abs, Value::Number(x, d)) => Ok(Value::Number(x.abs(), *d)),
            (Tag::USub | Tag::Abs, Value::Matrix(m)) => {
                m.try_map(|x| Self::eval_unary(tag, x, coord)).map(Value::Matrix)
            },
            (Tag::Not, Value::Number(x, _)) => Ok(Value::truth(*x == 0.0)),
            (Tag::Transp, Value::Matrix(m)) => Ok(Value::Matrix(m.transpose())),
            (Tag::Transp, v @ Value::Number(..)) => Ok(v.clone()),
            (_, v) => Err(RuntimeError::TypeError { details: format!("{tag} is not defined for a {}", v.kind()),
                                                    coord }),
        }
    }
}
