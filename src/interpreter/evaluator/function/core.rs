use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::builtin::{DimensionRule, lookup_builtin, lookup_constant},
        },
        lexer::token::Coordinate,
        value::{
            core::{Function, Scope, Value},
            dimension::Dimension,
        },
    },
};

impl Context {
    /// Evaluates the arguments of `f(a, b)` and calls `f`.
    ///
    /// # Errors
    /// - `UndefinedVariable` if `f` is not bound.
    /// - `TypeError` if `f` is bound to something other than a function.
    pub(crate) fn eval_call(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let callee = self.lookup(&node.label, scope.as_deref(), node)?;
        let Value::Function(function) = callee else {
            return Err(RuntimeError::TypeError { details: format!("{} is a {}, not a function", node.label, callee.kind()),
                                                 coord:   node.coord, });
        };

        let mut args = Vec::with_capacity(node.fields.len());
        for field in &node.fields {
            args.push(self.eval(field, scope.as_deref_mut())?);
        }

        self.call(&node.label, &function, args, node.coord)
    }

    /// Executes a user-defined function.
    ///
    /// The arguments are bound under the parameter names in a copy of the
    /// scope captured at definition, and the body is evaluated there.
    /// Globals, including the function itself, remain visible.
    ///
    /// # Errors
    /// `WrongArgumentCount` if the argument count differs from the parameter
    /// count.
    pub fn call(&mut self, name: &str, function: &Function, args: Vec<Value>, coord: Coordinate) -> EvalResult<Value> {
        if args.len() != function.params.len() {
            return Err(RuntimeError::WrongArgumentCount { name: name.to_string(),
                                                          expected: function.params.len(),
                                                          found: args.len(),
                                                          coord });
        }

        let mut local = function.scope.clone();
        for (param, arg) in function.params.iter().zip(args) {
            local.insert(param.clone(), arg);
        }
        self.eval(&function.body, Some(&mut local))
    }

    /// Evaluates a keyword: a named constant or a built-in function.
    ///
    /// # Errors
    /// - `UnknownKeyword` for names outside both tables.
    /// - `WrongArgumentCount` for a built-in called with the wrong number of
    ///   arguments.
    /// - `DimensionalArgument` and `DimensionMismatch` when the arguments
    ///   break the built-in's dimension rule.
    pub(crate) fn eval_keyword(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        if node.fields.is_empty()
           && let Some(value) = lookup_constant(&node.label)
        {
            return Ok(Value::scalar(value));
        }

        let Some(builtin) = lookup_builtin(&node.label) else {
            return Err(RuntimeError::UnknownKeyword { name:  node.label.clone(),
                                                      coord: node.coord, });
        };
        if node.fields.len() != builtin.arity() {
            return Err(RuntimeError::WrongArgumentCount { name:     node.label.clone(),
                                                          expected: builtin.arity(),
                                                          found:    node.fields.len(),
                                                          coord:    node.coord, });
        }

        let mut args = Vec::with_capacity(node.fields.len());
        let mut magnitudes = Vec::with_capacity(node.fields.len());
        for field in &node.fields {
            let value = self.eval(field, scope.as_deref_mut())?;
            let Value::Number(x, _) = value else {
                return Err(RuntimeError::TypeError { details: format!("{} expects numbers, found a {}", node.label, value.kind()),
                                                     coord:   field.coord, });
            };
            magnitudes.push(x);
            args.push(value);
        }

        let dimensions: Vec<_> = args.iter().filter_map(Value::dimension).collect();
        let dimension = match (builtin.rule, dimensions.as_slice()) {
            (DimensionRule::Dimensionless, ds) => {
                if let Some(arg) = args.iter().zip(ds).find_map(|(a, d)| (!d.is_dimensionless()).then_some(a)) {
                    return Err(RuntimeError::DimensionalArgument { name:  node.label.clone(),
                                                                   found: arg.to_string(),
                                                                   coord: node.coord, });
                }
                Dimension::DIMENSIONLESS
            },
            (DimensionRule::Preserve, [d]) => *d,
            (DimensionRule::Matching, [a, b]) if a == b => *a,
            _ => {
                let rendered = |index: usize| args.get(index).map(ToString::to_string).unwrap_or_default();
                return Err(RuntimeError::DimensionMismatch { operation: node.label.clone(),
                                                             left:      rendered(0),
                                                             right:     rendered(1),
                                                             coord:     node.coord, });
            },
        };

        let result = builtin.apply(&magnitudes).ok_or(RuntimeError::WrongArgumentCount { name:     node.label.clone(),
                                                                                          expected: builtin.arity(),
                                                                                          found:    magnitudes.len(),
                                                                                          coord:    node.coord, })?;
        Ok(Value::Number(result, dimension))
    }
}
