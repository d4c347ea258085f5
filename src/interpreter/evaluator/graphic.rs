use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Replacement, ReplacementKind, required},
        lexer::tag::Tag,
        value::{
            core::{Matrix, Scope, Value},
            render::format_number,
        },
    },
    util::num::{f64_to_usize_truncated, usize_to_f64_checked},
};

/// Step of `\range` when none is given.
pub const DEFAULT_STEP: f64 = 0.1;

/// Slack added before rounding down the number of steps, so a bound that
/// is a multiple of the step is reached despite rounding error.
const STEP_TOLERANCE: f64 = 1e-9;

/// Number of values `\range` enumerates from `low` to `high`, or `None`
/// when the step is not positive or the range is empty.
///
/// ```
/// use texcalc::interpreter::evaluator::graphic::range_len;
///
/// assert_eq!(range_len(0.0, 1.0, 0.1), Some(11));
/// assert_eq!(range_len(1.0, 0.0, 0.1), None);
/// assert_eq!(range_len(0.0, 1.0, 0.0), None);
/// ```
#[must_use]
pub fn range_len(low: f64, high: f64, step: f64) -> Option<usize> {
    if step <= 0.0 || step.is_nan() || high < low {
        return None;
    }
    let steps = f64_to_usize_truncated(((high - low) / step + STEP_TOLERANCE).floor(), ()).ok()?;
    steps.checked_add(1)
}

impl Context {
    /// Evaluates `\range[step]{lo}{hi}` into a row vector.
    ///
    /// # Errors
    /// - `DimensionMismatch` if bounds and step differ in dimension.
    /// - `InvalidStep` for a step that is not positive.
    /// - `EmptyRange` if `hi` lies below `lo`.
    pub(crate) fn eval_range(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let low = self.eval(required(node, node.lhs())?, scope.as_deref_mut())?;
        let high = self.eval(required(node, node.rhs())?, scope.as_deref_mut())?;
        let step = match node.condition() {
            Some(step) => Some(self.eval(step, scope)?),
            None => None,
        };

        let Value::Number(lo, dimension) = low else {
            return Err(RuntimeError::TypeError { details: format!("range bounds must be numbers, found a {}", low.kind()),
                                                 coord:   node.coord, });
        };
        let number = |value: &Value| match value {
            Value::Number(x, d) if *d == dimension => Ok(*x),
            Value::Number(..) => Err(RuntimeError::DimensionMismatch { operation: node.operation(),
                                                                       left:      low.to_string(),
                                                                       right:     value.to_string(),
                                                                       coord:     node.coord, }),
            other => Err(RuntimeError::TypeError { details: format!("range bounds must be numbers, found a {}", other.kind()),
                                                   coord:   node.coord, }),
        };
        let hi = number(&high)?;
        let st = step.as_ref().map_or(Ok(DEFAULT_STEP), number)?;

        if st <= 0.0 || st.is_nan() {
            return Err(RuntimeError::InvalidStep { step:  format_number(st),
                                                   coord: node.coord, });
        }
        let count = range_len(lo, hi, st).ok_or(RuntimeError::EmptyRange { coord: node.coord })?;

        let mut values = Vec::with_capacity(count);
        for k in 0..count {
            let k = usize_to_f64_checked(k, RuntimeError::EmptyRange { coord: node.coord })?;
            values.push(Value::Number(lo + k * st, dimension));
        }
        Matrix::row_vector(values).map(Value::Matrix)
                                  .ok_or(RuntimeError::EmptyRange { coord: node.coord })
    }

    /// Evaluates `\graphic{f}{fields}`.
    ///
    /// Exactly one field is a `\range`. `f` is called once per range value
    /// with that value in the range's position and the other fields fixed.
    /// The `(x, f(x))` pairs are recorded as a graphic replacement over the
    /// payload and returned as an `n x 2` matrix.
    ///
    /// # Errors
    /// - `RangeFieldCount` unless exactly one field is a range.
    /// - `WrongArgumentCount` if the field count differs from the parameter
    ///   count of `f`.
    /// - `TypeError` if `f` is not a function or returns a matrix.
    pub(crate) fn eval_graphic(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let callee = self.lookup(&node.label, scope.as_deref(), node)?;
        let Value::Function(function) = callee else {
            return Err(RuntimeError::TypeError { details: format!("{} is a {}, not a function", node.label, callee.kind()),
                                                 coord:   node.coord, });
        };

        let ranges = node.fields.iter().filter(|f| f.tag == Tag::Range).count();
        if ranges != 1 {
            return Err(RuntimeError::RangeFieldCount { found: ranges,
                                                       coord: node.coord, });
        }
        if node.fields.len() != function.params.len() {
            return Err(RuntimeError::WrongArgumentCount { name:     node.label.clone(),
                                                          expected: function.params.len(),
                                                          found:    node.fields.len(),
                                                          coord:    node.coord, });
        }

        let mut fixed = Vec::with_capacity(node.fields.len());
        let mut samples = Vec::new();
        let mut position = 0;
        for (index, field) in node.fields.iter().enumerate() {
            let value = self.eval(field, scope.as_deref_mut())?;
            if field.tag == Tag::Range {
                if let Value::Matrix(m) = &value {
                    samples = m.rows().iter().flatten().cloned().collect();
                }
                position = index;
            }
            fixed.push(value);
        }

        let mut points = Vec::with_capacity(samples.len());
        for x in samples {
            let mut args = fixed.clone();
            if let Some(slot) = args.get_mut(position) {
                *slot = x.clone();
            }
            let y = self.call(&node.label, &function, args, node.coord)?;
            if !matches!(y, Value::Number(..)) {
                return Err(RuntimeError::TypeError { details: format!("{} returned a {}, expected a number", node.label, y.kind()),
                                                     coord:   node.coord, });
            }
            points.push(vec![x, y]);
        }
        trace!(function = %node.label, samples = points.len(), "sampled graphic");

        let points = Matrix::new(points).ok_or(RuntimeError::EmptyRange { coord: node.coord })?;
        if let Some(range) = &node.extent {
            self.record(Replacement { kind:  ReplacementKind::Graphic,
                                      range: range.clone(),
                                      value: Value::Matrix(points.clone()), });
        }
        Ok(Value::Matrix(points))
    }
}
