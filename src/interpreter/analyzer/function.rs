use crate::{
    ast::Node,
    error::SemanticError,
    interpreter::{
        analyzer::core::{Analysis, AnalysisResult, Analyzer, Bindings, Signature, required},
        evaluator::function::builtin::{DimensionRule, lookup_builtin, lookup_constant},
        lexer::tag::Tag,
        value::{core::Value, dimension::Dimension},
    },
};

impl Analyzer {
    /// `:=` on an identifier, a matrix element or a function head.
    ///
    /// - `x := e` records the value of `e` and evaluates to it.
    /// - `A_{i, j} := e` checks that `A` is a matrix and evaluates to zero.
    /// - `f(a, b) := e` registers the signature of `f` and evaluates to
    ///   zero.
    ///
    /// # Errors
    /// `InvalidAssignment` for any other target.
    pub(in crate::interpreter::analyzer) fn analyze_assignment(&mut self,
                                                               node: &Node,
                                                               inside: bool,
                                                               locals: Bindings)
                                                               -> AnalysisResult<Analysis> {
        let target = required(node, node.lhs())?;
        let body = required(node, node.rhs())?;

        match target.tag {
            Tag::Ident if target.fields.is_empty() => {
                let (value, mut locals) = self.analyze(body, inside, locals)?;
                self.define(&target.label, value.clone(), inside, &mut locals);
                Ok((value, locals))
            },
            Tag::Ident => {
                let (_, locals) = self.analyze(target, inside, locals)?;
                let (_, locals) = self.analyze(body, inside, locals)?;
                Ok((Value::zero(), locals))
            },
            Tag::Func => {
                self.define_function(target, body)?;
                Ok((Value::zero(), locals))
            },
            _ => Err(SemanticError::InvalidAssignment { target: target.label.clone(),
                                                        coord:  target.coord, }),
        }
    }

    /// Analyzes a function body with its parameters bound to undefined
    /// values and stores the resulting signature.
    ///
    /// A provisional all-wildcard signature is registered first, so
    /// recursive calls inside the body are accepted.
    fn define_function(&mut self, head: &Node, body: &Node) -> AnalysisResult<()> {
        let mut params = Vec::with_capacity(head.fields.len());
        for param in &head.fields {
            if !param.is_bare_identifier() {
                return Err(SemanticError::InvalidAssignment { target: param.label.clone(),
                                                              coord:  param.coord, });
            }
            params.push((param.label.clone(), Value::Undefined));
        }

        self.functions.insert(head.label.clone(),
                              Signature { params: params.clone(),
                                          result: Value::Undefined, });

        let (result, bound) = self.analyze(body, true, params.clone())?;
        let params = params.into_iter()
                           .map(|(name, _)| {
                               let value = bound.iter()
                                                .find(|(n, _)| *n == name)
                                                .map_or(Value::Undefined, |(_, v)| v.clone());
                               (name, value)
                           })
                           .collect();

        self.functions.insert(head.label.clone(), Signature { params, result });
        Ok(())
    }

    /// A call `f(a, b)` of a user function.
    ///
    /// # Errors
    /// - `UndefinedFunction` if `f` is neither a known function nor a bound
    ///   name.
    /// - `ArityMismatch` and `ArgumentMismatch` against the signature.
    pub(in crate::interpreter::analyzer) fn analyze_call(&mut self,
                                                         node: &Node,
                                                         inside: bool,
                                                         locals: Bindings)
                                                         -> AnalysisResult<Analysis> {
        let signature = self.functions.get(&node.label).cloned();
        let (args, locals) = self.analyze_all(&node.fields, inside, locals)?;

        let Some(signature) = signature else {
            if self.lookup(&node.label, &locals).is_some() {
                return Ok((Value::Undefined, locals));
            }
            return Err(SemanticError::UndefinedFunction { name:  node.label.clone(),
                                                          coord: node.coord, });
        };

        if args.len() != signature.params.len() {
            return Err(SemanticError::ArityMismatch { name:     node.label.clone(),
                                                      expected: signature.params.len(),
                                                      found:    args.len(),
                                                      coord:    node.coord, });
        }

        for (index, ((_, declared), arg)) in signature.params.iter().zip(&args).enumerate() {
            if !compatible(declared, arg) {
                return Err(SemanticError::ArgumentMismatch { name: node.label.clone(),
                                                             index,
                                                             expected: declared.to_string(),
                                                             found: arg.to_string(),
                                                             coord: node.coord });
            }
        }

        Ok((signature.result, locals))
    }

    /// A keyword: a named constant or a built-in function.
    ///
    /// # Errors
    /// `UnknownKeyword` for names outside both tables, `ArityMismatch` and
    /// `InvalidOperands` for misused built-ins.
    pub(in crate::interpreter::analyzer) fn analyze_keyword(&mut self,
                                                            node: &Node,
                                                            inside: bool,
                                                            locals: Bindings)
                                                            -> AnalysisResult<Analysis> {
        if node.fields.is_empty()
           && let Some(value) = lookup_constant(&node.label)
        {
            return Ok((Value::scalar(value), locals));
        }

        let Some(builtin) = lookup_builtin(&node.label) else {
            return Err(SemanticError::UnknownKeyword { name:  node.label.clone(),
                                                       coord: node.coord, });
        };
        if node.fields.len() != builtin.arity() {
            return Err(SemanticError::ArityMismatch { name:     node.label.clone(),
                                                      expected: builtin.arity(),
                                                      found:    node.fields.len(),
                                                      coord:    node.coord, });
        }

        let (mut args, mut locals) = self.analyze_all(&node.fields, inside, locals)?;
        if builtin.rule == DimensionRule::Dimensionless {
            for (arg, field) in args.iter_mut().zip(&node.fields) {
                *arg = self.infer(field,
                                  arg.clone(),
                                  Some(Value::InferredNumber(Dimension::DIMENSIONLESS)),
                                  inside,
                                  &mut locals);
            }
        }

        if args.iter().any(Value::is_undefined) {
            return Ok((Value::Undefined, locals));
        }
        let invalid = |details: String| SemanticError::InvalidOperands { operation: node.label.clone(),
                                                                         details,
                                                                         coord: node.coord };

        let mut dimensions = Vec::with_capacity(args.len());
        for arg in &args {
            match arg.dimension() {
                Some(d) if arg.is_numeric() => dimensions.push(d),
                _ => return Err(invalid(format!("expects numbers, found a {}", arg.kind()))),
            }
        }

        let rendered = |index: usize| args.get(index).map(ToString::to_string).unwrap_or_default();
        let dimension = match (builtin.rule, dimensions.as_slice()) {
            (DimensionRule::Dimensionless, ds) if ds.iter().all(|d| d.is_dimensionless()) => Dimension::DIMENSIONLESS,
            (DimensionRule::Dimensionless, _) => {
                return Err(invalid(format!("expects a dimensionless argument, found {}", rendered(0))));
            },
            (DimensionRule::Preserve, [d]) => *d,
            (DimensionRule::Matching, [a, b]) if a == b => *a,
            _ => {
                return Err(SemanticError::DimensionMismatch { operation: node.label.clone(),
                                                              left:      rendered(0),
                                                              right:     rendered(1),
                                                              coord:     node.coord, });
            },
        };

        let magnitudes: Option<Vec<f64>> = args.iter()
                                               .map(|a| match a {
                                                   Value::Number(x, _) => Some(*x),
                                                   _ => None,
                                               })
                                               .collect();
        let value = match magnitudes.and_then(|m| builtin.apply(&m)) {
            Some(x) => Value::Number(x, dimension),
            None => Value::InferredNumber(dimension),
        };
        Ok((value, locals))
    }

    /// `\graphic{f}{fields}`: `f` must be callable with the given fields.
    pub(in crate::interpreter::analyzer) fn analyze_graphic(&mut self,
                                                            node: &Node,
                                                            inside: bool,
                                                            locals: Bindings)
                                                            -> AnalysisResult<Analysis> {
        let (_, locals) = self.analyze_all(&node.fields, inside, locals)?;

        match self.functions.get(&node.label) {
            Some(signature) if signature.params.len() != node.fields.len() => {
                Err(SemanticError::ArityMismatch { name:     node.label.clone(),
                                                   expected: signature.params.len(),
                                                   found:    node.fields.len(),
                                                   coord:    node.coord, })
            },
            Some(_) => Ok((Value::Undefined, locals)),
            None if self.lookup(&node.label, &locals).is_some() => Ok((Value::Undefined, locals)),
            None => Err(SemanticError::UndefinedFunction { name:  node.label.clone(),
                                                           coord: node.coord, }),
        }
    }
}

/// Whether an argument fits a declared parameter.
///
/// Undefined on either side matches anything; otherwise kinds and
/// dimensions must agree.
fn compatible(declared: &Value, arg: &Value) -> bool {
    if declared.is_undefined() || arg.is_undefined() {
        return true;
    }
    let same_kind = (declared.is_numeric() && arg.is_numeric())
                    || (declared.is_matrix() && arg.is_matrix())
                    || (matches!(declared, Value::Function(_)) && matches!(arg, Value::Function(_)));
    same_kind && declared.dimension() == arg.dimension()
}
