use crate::{
    ast::Node,
    error::SemanticError,
    interpreter::{
        analyzer::core::{Analysis, AnalysisResult, Analyzer, Bindings, required, unexpected},
        evaluator::graphic::{DEFAULT_STEP, range_len},
        lexer::tag::Tag,
        value::{core::Value, dimension::Dimension},
    },
    util::num::f64_to_i32_checked,
};

impl Analyzer {
    /// A `block` environment. Its statements bind locally; the value is the
    /// last statement's.
    pub(in crate::interpreter::analyzer) fn analyze_block(&mut self,
                                                          node: &Node,
                                                          locals: Bindings)
                                                          -> AnalysisResult<Analysis> {
        let (values, locals) = self.analyze_all(&node.fields, true, locals)?;
        Ok((values.into_iter().last().unwrap_or_else(Value::zero), locals))
    }

    /// A `caseblock`.
    ///
    /// Guards are decided on provisional values in source order and only the
    /// first selected alternative is analyzed, as evaluation would take it.
    pub(in crate::interpreter::analyzer) fn analyze_cases(&mut self,
                                                          node: &Node,
                                                          inside: bool,
                                                          mut locals: Bindings)
                                                          -> AnalysisResult<Analysis> {
        for alternative in &node.fields {
            let value = required(alternative, alternative.rhs())?;
            let Some(guard) = alternative.condition() else {
                return self.analyze(value, inside, locals);
            };

            let (holds, next) = self.analyze(guard, inside, locals)?;
            locals = next;
            if !holds.is_numeric() && !holds.is_undefined() {
                return Err(SemanticError::InvalidOperands { operation: Tag::When.to_string(),
                                                            details:   format!("guard is a {}", holds.kind()),
                                                            coord:     guard.coord, });
            }
            if holds.is_truthy() {
                return self.analyze(value, inside, locals);
            }
        }

        Err(SemanticError::NoMatchingCase { coord: node.coord })
    }

    /// `\ifexpr`: the condition and both branches are checked.
    pub(in crate::interpreter::analyzer) fn analyze_if(&mut self,
                                                       node: &Node,
                                                       inside: bool,
                                                       locals: Bindings)
                                                       -> AnalysisResult<Analysis> {
        let (_, locals) = self.analyze(required(node, node.condition())?, inside, locals)?;
        let (value, locals) = self.analyze(required(node, node.rhs())?, inside, locals)?;
        let locals = match node.lhs() {
            Some(otherwise) => self.analyze(otherwise, inside, locals)?.1,
            None => locals,
        };
        Ok((value, locals))
    }

    /// `\while`: condition and body are each checked once.
    pub(in crate::interpreter::analyzer) fn analyze_while(&mut self,
                                                          node: &Node,
                                                          inside: bool,
                                                          locals: Bindings)
                                                          -> AnalysisResult<Analysis> {
        let (_, locals) = self.analyze(required(node, node.condition())?, inside, locals)?;
        self.analyze(required(node, node.rhs())?, inside, locals)
    }

    /// The loop of a desugared `\sum` or `\prod`.
    ///
    /// The condition is `i \leq upper`; both of its sides must be
    /// dimensionless numbers, and an undefined bare identifier bound is
    /// inferred as one. The body runs once. For a product the accumulator
    /// named by the node's label is then scaled to the dimension it reaches
    /// after all iterations, or left undefined when the bounds are not known
    /// yet.
    pub(in crate::interpreter::analyzer) fn analyze_accumulation(&mut self,
                                                                 node: &Node,
                                                                 inside: bool,
                                                                 locals: Bindings)
                                                                 -> AnalysisResult<Analysis> {
        let cond = required(node, node.condition())?;
        let (lhs, rhs) = (required(cond, cond.lhs())?, required(cond, cond.rhs())?);
        let scalar = Some(Value::InferredNumber(Dimension::DIMENSIONLESS));

        let (lower, locals) = self.analyze(lhs, inside, locals)?;
        let (upper, mut locals) = self.analyze(rhs, inside, locals)?;
        let lower = self.infer(lhs, lower, scalar.clone(), inside, &mut locals);
        let upper = self.infer(rhs, upper, scalar, inside, &mut locals);

        let valid = |bound: &Value| {
            bound.is_undefined() || (bound.is_numeric() && bound.dimension().is_some_and(Dimension::is_dimensionless))
        };
        if !valid(&lower) || !valid(&upper) {
            return Err(SemanticError::DimensionalBound { lower: lower.to_string(),
                                                         upper: upper.to_string(),
                                                         coord: node.coord, });
        }

        let before = self.lookup(&node.label, &locals);
        let (value, mut locals) = self.analyze(required(node, node.rhs())?, inside, locals)?;
        if node.tag != Tag::Product {
            return Ok((value, locals));
        }

        let after = self.lookup(&node.label, &locals);
        let (Some(d0), Some(d1)) = (before.as_ref().and_then(Value::dimension), after.as_ref().and_then(Value::dimension))
        else {
            return Ok((value, locals));
        };
        let overflow = || SemanticError::ExponentOverflow { operation: node.operation(),
                                                            coord:     node.coord, };
        let step = d1.checked_sub(d0).ok_or_else(overflow)?;

        let scaled = match (&lower, &upper) {
            _ if step.is_dimensionless() => Value::InferredNumber(d0),
            (Value::Number(low, _), Value::Number(high, _)) => {
                let passes = f64_to_i32_checked((high - low).floor() + 1.0, ()).map_or(1, |n| n.max(0));
                let grown = step.checked_scale(passes).and_then(|d| d0.checked_add(d));
                Value::InferredNumber(grown.ok_or_else(overflow)?)
            },
            _ => Value::Undefined,
        };
        self.rebind(&node.label, scaled.clone(), inside, &mut locals);

        Ok((scaled, locals))
    }

    /// `\range[step]{lo}{hi}`: bounds and step share one dimension.
    pub(in crate::interpreter::analyzer) fn analyze_range(&mut self,
                                                          node: &Node,
                                                          inside: bool,
                                                          locals: Bindings)
                                                          -> AnalysisResult<Analysis> {
        let (low, locals) = self.analyze(required(node, node.lhs())?, inside, locals)?;
        let (high, locals) = self.analyze(required(node, node.rhs())?, inside, locals)?;
        let (step, locals) = match node.condition() {
            Some(step) => {
                let (step, locals) = self.analyze(step, inside, locals)?;
                (Some(step), locals)
            },
            None => (None, locals),
        };

        let dimension = low.dimension().filter(|_| low.is_numeric()).ok_or_else(|| unexpected(node))?;
        for bound in std::iter::once(&high).chain(step.as_ref()) {
            if !bound.is_numeric() || bound.dimension() != Some(dimension) {
                return Err(SemanticError::DimensionMismatch { operation: node.operation(),
                                                              left:      low.to_string(),
                                                              right:     bound.to_string(),
                                                              coord:     node.coord, });
            }
        }

        let cols = match (&low, &high, &step) {
            (Value::Number(lo, _), Value::Number(hi, _), None) => range_len(*lo, *hi, DEFAULT_STEP),
            (Value::Number(lo, _), Value::Number(hi, _), Some(Value::Number(st, _))) => range_len(*lo, *hi, *st),
            _ => None,
        };

        Ok((Value::InferredMatrix { dimension,
                                    rows: 1,
                                    cols: cols.unwrap_or(1) },
            locals))
    }
}
