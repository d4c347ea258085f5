use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, required},
        value::core::{Scope, Value},
    },
};

impl Context {
    /// Evaluates `\ifexpr`.
    ///
    /// The `right` branch runs when the condition is non-zero, the `left`
    /// branch otherwise. Without an `\otherwise` branch a false condition
    /// yields zero.
    pub(crate) fn eval_if(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let condition = self.eval(required(node, node.condition())?, scope.as_deref_mut())?;
        if condition.is_truthy() {
            self.eval(required(node, node.rhs())?, scope)
        } else if let Some(otherwise) = node.lhs() {
            self.eval(otherwise, scope)
        } else {
            Ok(Value::zero())
        }
    }

    /// Evaluates `\while` and the loops of desugared sums and products.
    ///
    /// The condition is re-evaluated before every pass. The value is the
    /// last pass's, or zero if the body never ran.
    pub(crate) fn eval_loop(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let condition = required(node, node.condition())?;
        let body = required(node, node.rhs())?;

        let mut last = Value::zero();
        while self.eval(condition, scope.as_deref_mut())?.is_truthy() {
            last = self.eval(body, scope.as_deref_mut())?;
        }
        Ok(last)
    }

    /// Evaluates a `caseblock`: the first alternative whose guard holds, or
    /// the `\otherwise` alternative, supplies the value.
    ///
    /// # Errors
    /// `NoMatchingCase` if no alternative applies.
    pub(crate) fn eval_cases(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        for alternative in &node.fields {
            let selected = match alternative.condition() {
                Some(guard) => self.eval(guard, scope.as_deref_mut())?.is_truthy(),
                None => true,
            };
            if selected {
                return self.eval(required(alternative, alternative.rhs())?, scope);
            }
        }
        Err(RuntimeError::NoMatchingCase { coord: node.coord })
    }
}
