use crate::{
    ast::Node,
    error::SemanticError,
    interpreter::{
        analyzer::core::{Analysis, AnalysisResult, Analyzer, Bindings, inferred_like, required},
        evaluator::binary::comparison::compare_magnitudes,
        lexer::tag::Tag,
        value::{core::Value, dimension::Dimension},
    },
    util::num::f64_to_i32_checked,
};

/// What an undefined identifier operand learns from the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inference {
    /// The other operand's dimension and shape.
    Matching,
    /// A dimensionless number, or a dimensionless matrix of the other
    /// operand's shape.
    Dimensionless,
}

impl Analyzer {
    /// Analyzes both operands of a binary node, left first, and infers an
    /// undefined identifier operand from the other side.
    fn operands(&mut self,
                node: &Node,
                inside: bool,
                locals: Bindings,
                rule: Inference)
                -> AnalysisResult<(Value, Value, Bindings)> {
        let lhs = required(node, node.lhs())?;
        let rhs = required(node, node.rhs())?;

        let (left, locals) = self.analyze(lhs, inside, locals)?;
        let (right, mut locals) = self.analyze(rhs, inside, locals)?;

        let dimensionless = rule == Inference::Dimensionless;
        let left = self.infer(lhs, left, inferred_like(&right, dimensionless), inside, &mut locals);
        let right = self.infer(rhs, right, inferred_like(&left, dimensionless), inside, &mut locals);

        Ok((left, right, locals))
    }

    /// `+` and `-`: equal dimensions for numbers, equal shapes for matrices.
    pub(in crate::interpreter::analyzer) fn analyze_additive(&mut self,
                                                             node: &Node,
                                                             inside: bool,
                                                             locals: Bindings)
                                                             -> AnalysisResult<Analysis> {
        let (left, right, locals) = self.operands(node, inside, locals, Inference::Matching)?;

        let value = match (&left, &right) {
            (Value::Undefined, other) | (other, Value::Undefined) => other.clone(),
            (Value::Number(x, _), Value::Number(y, _)) => {
                let dimension = matching_dimension(node, &left, &right)?;
                Value::Number(if node.tag == Tag::Add { x + y } else { x - y }, dimension)
            },
            (a, b) if a.is_numeric() && b.is_numeric() => Value::InferredNumber(matching_dimension(node, a, b)?),
            (a, b) if a.is_matrix() && b.is_matrix() => match (a.shape(), b.shape()) {
                (Some((rows, cols)), Some(other)) if (rows, cols) == other => {
                    Value::InferredMatrix { dimension: a.dimension().unwrap_or_default(),
                                            rows,
                                            cols }
                },
                _ => return Err(mismatch(node, a, b)),
            },
            (a, b) => return Err(invalid(node, a, b)),
        };

        Ok((value, locals))
    }

    /// Comparisons, `\land` and `\lor`: operands of equal dimension, a
    /// dimensionless truth value decided on provisional magnitudes.
    pub(in crate::interpreter::analyzer) fn analyze_comparison(&mut self,
                                                               node: &Node,
                                                               inside: bool,
                                                               locals: Bindings)
                                                               -> AnalysisResult<Analysis> {
        let (left, right, locals) = self.operands(node, inside, locals, Inference::Matching)?;

        if left.is_undefined() || right.is_undefined() {
            return Ok((Value::InferredNumber(Dimension::DIMENSIONLESS), locals));
        }

        if let (Some(x), Some(y)) = (left.magnitude(), right.magnitude()) {
            matching_dimension(node, &left, &right)?;
            return Ok((Value::truth(compare_magnitudes(node.tag, x, y)), locals));
        }

        if left.is_matrix() && right.is_matrix() && matches!(node.tag, Tag::Eq | Tag::Neq) {
            if left.shape() != right.shape() {
                return Err(mismatch(node, &left, &right));
            }
            return Ok((Value::InferredNumber(Dimension::DIMENSIONLESS), locals));
        }

        Err(invalid(node, &left, &right))
    }

    /// `expr = \placeholder` and `expr = \placeholder / d`: the captured
    /// expression and divisor are checked, the result is true.
    pub(in crate::interpreter::analyzer) fn analyze_capture(&mut self,
                                                            node: &Node,
                                                            inside: bool,
                                                            locals: Bindings)
                                                            -> AnalysisResult<Analysis> {
        let (_, locals) = self.analyze(required(node, node.lhs())?, inside, locals)?;
        let locals = match node.placeholder_capture().and_then(|(_, divisor)| divisor) {
            Some(divisor) => self.analyze(divisor, inside, locals)?.1,
            None => locals,
        };
        Ok((Value::truth(true), locals))
    }

    /// `\cdot`, `/` and `\frac`: dimensions add or subtract; matrices follow
    /// the contraction rules of the evaluator.
    pub(in crate::interpreter::analyzer) fn analyze_multiplicative(&mut self,
                                                                   node: &Node,
                                                                   inside: bool,
                                                                   locals: Bindings)
                                                                   -> AnalysisResult<Analysis> {
        let (left, right, locals) = self.operands(node, inside, locals, Inference::Dimensionless)?;
        let divide = node.tag != Tag::Mul;

        let (Some(dl), Some(dr)) = (left.dimension(), right.dimension()) else {
            return match (&left, &right) {
                (Value::Undefined, other) | (other, Value::Undefined) => Ok((other.clone(), locals)),
                (a, b) => Err(invalid(node, a, b)),
            };
        };
        let dimension = if divide { dl.checked_sub(dr) } else { dl.checked_add(dr) };
        let dimension = dimension.ok_or_else(|| SemanticError::ExponentOverflow { operation: node.operation(),
                                                                                  coord:     node.coord, })?;

        let value = match (left.shape(), right.shape()) {
            (None, None) => match (&left, &right) {
                (Value::Number(x, _), Value::Number(y, _)) if divide => {
                    Value::Number(if *y == 0.0 { 0.0 } else { x / y }, dimension)
                },
                (Value::Number(x, _), Value::Number(y, _)) => Value::Number(x * y, dimension),
                _ => Value::InferredNumber(dimension),
            },
            (Some((rows, cols)), None) => Value::InferredMatrix { dimension, rows, cols },
            (None, Some((rows, cols))) if !divide => Value::InferredMatrix { dimension, rows, cols },
            (Some((r1, c1)), Some((r2, c2))) if !divide => {
                if c1 == r2 {
                    Value::InferredMatrix { dimension,
                                            rows: r1,
                                            cols: c2 }
                } else if (r1 == 1 && r2 == 1 && c1 == c2) || (c1 == 1 && c2 == 1 && r1 == r2) {
                    Value::InferredNumber(dimension)
                } else {
                    return Err(mismatch(node, &left, &right));
                }
            },
            _ => return Err(invalid(node, &left, &right)),
        };

        Ok((value, locals))
    }

    /// `^`: the exponent is a dimensionless number; a base with a dimension
    /// needs an integer exponent of at least one.
    pub(in crate::interpreter::analyzer) fn analyze_power(&mut self,
                                                          node: &Node,
                                                          inside: bool,
                                                          locals: Bindings)
                                                          -> AnalysisResult<Analysis> {
        let lhs = required(node, node.lhs())?;
        let rhs = required(node, node.rhs())?;
        let scalar = Some(Value::InferredNumber(Dimension::DIMENSIONLESS));

        let (base, locals) = self.analyze(lhs, inside, locals)?;
        let (exponent, mut locals) = self.analyze(rhs, inside, locals)?;
        let base = self.infer(lhs, base, scalar.clone(), inside, &mut locals);
        let exponent = self.infer(rhs, exponent, scalar, inside, &mut locals);

        let invalid_exponent = || SemanticError::InvalidExponent { base:     base.to_string(),
                                                                   exponent: exponent.to_string(),
                                                                   coord:    node.coord, };

        if base.is_undefined() {
            return Ok((Value::Undefined, locals));
        }
        let (Some(x), Some(base_dimension)) = (base.magnitude(), base.dimension()) else {
            return Err(SemanticError::InvalidOperands { operation: node.operation(),
                                                        details:   format!("cannot raise a {}", base.kind()),
                                                        coord:     node.coord, });
        };
        if exponent.is_undefined() {
            let value = if base_dimension.is_dimensionless() { base.clone() } else { Value::Undefined };
            return Ok((value, locals));
        }
        let Some(p) = exponent.magnitude().filter(|_| exponent.dimension().is_some_and(Dimension::is_dimensionless))
        else {
            return Err(invalid_exponent());
        };

        let dimension = if base_dimension.is_dimensionless() {
            Dimension::DIMENSIONLESS
        } else {
            let power = f64_to_i32_checked(p, invalid_exponent())?;
            if power < 1 || !matches!(exponent, Value::Number(..)) {
                return Err(invalid_exponent());
            }
            base_dimension.checked_scale(power).ok_or_else(invalid_exponent)?
        };

        let value = match (&base, &exponent) {
            (Value::Number(..), Value::Number(..)) => Value::Number(x.powf(p), dimension),
            _ => Value::InferredNumber(dimension),
        };
        Ok((value, locals))
    }

    /// Prefix operators: signs, `\abs`, `\neg` and `\transpose`.
    pub(in crate::interpreter::analyzer) fn analyze_prefix(&mut self,
                                                           node: &Node,
                                                           inside: bool,
                                                           locals: Bindings)
                                                           -> AnalysisResult<Analysis> {
        let operand = required(node, node.rhs().or_else(|| node.lhs()))?;
        let (value, locals) = self.analyze(operand, inside, locals)?;

        let value = match (node.tag, value) {
            (Tag::USub, Value::Number(x, d)) => Value::Number(-x, d),
            (Tag::Abs, Value::Number(x, d)) => Value::Number(x.abs(), d),
            (Tag::Not, Value::Undefined) => Value::InferredNumber(Dimension::DIMENSIONLESS),
            (Tag::Not, v) if v.is_numeric() => Value::truth(v.magnitude() == Some(0.0)),
            (Tag::Not, v) => {
                return Err(SemanticError::InvalidOperands { operation: node.operation(),
                                                            details:   format!("cannot negate a {}", v.kind()),
                                                            coord:     node.coord, });
            },
            (Tag::Transp, Value::Matrix(m)) => Value::Matrix(m.transpose()),
            (Tag::Transp, Value::InferredMatrix { dimension, rows, cols }) => {
                Value::InferredMatrix { dimension,
                                        rows: cols,
                                        cols: rows }
            },
            (_, v) => v,
        };

        Ok((value, locals))
    }
}

/// The common dimension of two numeric operands.
fn matching_dimension(node: &Node, left: &Value, right: &Value) -> AnalysisResult<Dimension> {
    match (left.dimension(), right.dimension()) {
        (Some(a), Some(b)) if a == b => Ok(a),
        _ => Err(mismatch(node, left, right)),
    }
}

fn mismatch(node: &Node, left: &Value, right: &Value) -> SemanticError {
    SemanticError::DimensionMismatch { operation: node.operation(),
                                       left:      left.to_string(),
                                       right:     right.to_string(),
                                       coord:     node.coord, }
}

fn invalid(node: &Node, left: &Value, right: &Value) -> SemanticError {
    SemanticError::InvalidOperands { operation: node.operation(),
                                     details:   format!("{} and {}", left.kind(), right.kind()),
                                     coord:     node.coord, }
}
