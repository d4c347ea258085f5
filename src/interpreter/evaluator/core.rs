use std::{collections::BTreeMap, ops::Range, rc::Rc};

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        lexer::tag::Tag,
        value::{
            core::{Function, Matrix, Scope, Value},
            dimension::Dimension,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// What a replacement renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementKind {
    /// A captured value, rendered like any other value.
    Value,
    /// The samples of a `\graphic`, rendered as plot coordinates.
    Graphic,
}

/// A value to be spliced over a byte range of the region text.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub kind:  ReplacementKind,
    pub range: Range<usize>,
    pub value: Value,
}

/// Stores the runtime evaluation context.
///
/// Holds the global scope, which persists across regions, and the
/// replacements captured while evaluating the current region.
///
/// ## Usage
///
/// `Context` is created once per document. Each region is evaluated with
/// [`Context::eval`], after which [`Context::take_replacements`] hands the
/// captured values to the splicer.
#[derive(Debug, Default)]
pub struct Context {
    pub global:   Scope,
    replacements: BTreeMap<usize, Replacement>,
}

impl Context {
    /// Creates a context with an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a node and returns its value.
    ///
    /// This is the main entry point for evaluation. The evaluator dispatches
    /// on the node's tag: literals, identifiers, operators, calls, blocks,
    /// case blocks, matrices, conditionals, loops, ranges and graphics.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `scope`: The local scope of the function call being evaluated, if
    ///   any.
    ///
    /// # Returns
    /// The value of the node. Statements without a value of their own yield
    /// [`Value::zero`].
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{
    ///     evaluator::core::Context,
    ///     lexer::{core::Lexer, token::Coordinate},
    ///     parser::core::parse_program,
    ///     value::core::Value,
    /// };
    ///
    /// let tokens = Lexer::new("3+4*2", Coordinate::default()).tokenize().unwrap();
    /// let root = parse_program(&tokens).unwrap();
    ///
    /// let mut ctx = Context::new();
    /// assert_eq!(ctx.eval(&root, None).unwrap(), Value::scalar(11.0));
    /// ```
    pub fn eval(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        match node.tag {
            Tag::Root | Tag::BeginB => self.eval_block(&node.fields, scope),
            Tag::Number => node.label.parse().map(Value::scalar).map_err(|_| unexpected(node)),
            Tag::Dimension => {
                let dimension = Dimension::from_unit(&node.label).ok_or_else(|| unexpected(node))?;
                Ok(Value::Number(1.0, dimension))
            },
            Tag::Placeholder => Ok(Value::zero()),
            Tag::Ident => self.eval_identifier(node, scope),
            Tag::Func => self.eval_call(node, scope),
            Tag::Keyword => self.eval_keyword(node, scope),
            Tag::UAdd | Tag::USub | Tag::Abs | Tag::Not | Tag::Transp => self.eval_prefix(node, scope),
            Tag::Eq if node.placeholder_capture().is_some() => self.eval_capture(node, scope),
            Tag::Add
            | Tag::Sub
            | Tag::Mul
            | Tag::Div
            | Tag::Frac
            | Tag::Pow
            | Tag::Lt
            | Tag::Gt
            | Tag::Leq
            | Tag::Geq
            | Tag::Eq
            | Tag::Neq
            | Tag::And
            | Tag::Or => {
                let left = self.eval(required(node, node.lhs())?, scope.as_deref_mut())?;
                let right = self.eval(required(node, node.rhs())?, scope)?;
                Self::eval_binary(node.tag, &left, &right, node.coord)
            },
            Tag::Set => self.eval_assignment(node, scope),
            Tag::BeginC => self.eval_cases(node, scope),
            Tag::BeginM => self.eval_matrix(node, scope),
            Tag::If => self.eval_if(node, scope),
            Tag::While | Tag::Sum | Tag::Product => self.eval_loop(node, scope),
            Tag::Range => self.eval_range(node, scope),
            Tag::Graphic => self.eval_graphic(node, scope),
            _ => Err(unexpected(node)),
        }
    }

    /// Evaluates statements in order and returns the last value.
    pub(crate) fn eval_block(&mut self, statements: &[Node], mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let mut last = Value::zero();
        for statement in statements {
            last = self.eval(statement, scope.as_deref_mut())?;
        }
        Ok(last)
    }

    /// Resolves a name in the local scope first, then the global scope.
    pub fn lookup(&self, name: &str, scope: Option<&Scope>, node: &Node) -> EvalResult<Value> {
        scope.and_then(|s| s.get(name))
             .or_else(|| self.global.get(name))
             .cloned()
             .ok_or_else(|| RuntimeError::UndefinedVariable { name:  name.to_string(),
                                                              coord: node.coord, })
    }

    /// Binds a name.
    ///
    /// The write goes to the local scope when one is active and the name is
    /// already local or not global; otherwise the global binding receives it.
    pub fn define(&mut self, name: &str, value: Value, scope: Option<&mut Scope>) {
        match scope {
            Some(local) if local.contains_key(name) || !self.global.contains_key(name) => {
                local.insert(name.to_string(), value);
            },
            _ => {
                self.global.insert(name.to_string(), value);
            },
        }
    }

    /// Removes and returns the replacements captured so far, ordered by
    /// their position in the region.
    pub fn take_replacements(&mut self) -> Vec<Replacement> {
        std::mem::take(&mut self.replacements).into_values().collect()
    }

    pub(crate) fn record(&mut self, replacement: Replacement) {
        self.replacements.insert(replacement.range.start, replacement);
    }

    /// Evaluates an identifier, reading a matrix element if it is indexed.
    fn eval_identifier(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let value = self.lookup(&node.label, scope.as_deref(), node)?;
        if node.fields.is_empty() {
            return Ok(value);
        }

        let indices = self.eval_indices(&node.fields, scope.as_deref_mut())?;
        let Value::Matrix(matrix) = value else {
            return Err(RuntimeError::TypeError { details: format!("cannot index a {}", value.kind()),
                                                 coord:   node.coord, });
        };
        let (row, col) = Self::address(&matrix, &indices, node.coord)?;
        matrix.get(row, col).cloned().ok_or_else(|| unexpected(node))
    }

    /// `:=` on a name, a matrix element or a function head.
    fn eval_assignment(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let target = required(node, node.lhs())?;
        let body = required(node, node.rhs())?;

        match target.tag {
            Tag::Ident if target.fields.is_empty() => {
                let value = self.eval(body, scope.as_deref_mut())?;
                self.define(&target.label, value.clone(), scope);
                Ok(value)
            },
            Tag::Ident => {
                let value = self.eval(body, scope.as_deref_mut())?;
                let indices = self.eval_indices(&target.fields, scope.as_deref_mut())?;

                let slot = match scope.and_then(|s| s.get_mut(&target.label)) {
                    Some(slot) => slot,
                    None => self.global
                                .get_mut(&target.label)
                                .ok_or_else(|| RuntimeError::UndefinedVariable { name:  target.label.clone(),
                                                                                 coord: target.coord, })?,
                };
                let Value::Matrix(matrix) = slot else {
                    return Err(RuntimeError::InvalidAssignment { target: target.label.clone(),
                                                                 coord:  target.coord, });
                };
                let (row, col) = Self::address(matrix, &indices, target.coord)?;
                if let Some(cell) = matrix.get_mut(row, col) {
                    *cell = value;
                }
                Ok(Value::zero())
            },
            Tag::Func => {
                let params = target.fields
                                   .iter()
                                   .map(|p| {
                                       if p.is_bare_identifier() {
                                           Ok(p.label.clone())
                                       } else {
                                           Err(RuntimeError::InvalidAssignment { target: p.label.clone(),
                                                                                 coord:  p.coord, })
                                       }
                                   })
                                   .collect::<EvalResult<Vec<_>>>()?;
                let function = Function { params,
                                          scope: scope.as_deref().unwrap_or(&self.global).clone(),
                                          body: body.clone() };
                self.define(&target.label, Value::Function(Rc::new(function)), scope);
                Ok(Value::zero())
            },
            _ => Err(RuntimeError::InvalidAssignment { target: target.label.clone(),
                                                       coord:  target.coord, }),
        }
    }

    /// Builds a matrix from a `pmatrix` literal.
    fn eval_matrix(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let mut rows = Vec::with_capacity(node.fields.len());
        for row in &node.fields {
            let mut cells = Vec::with_capacity(row.fields.len());
            for cell in &row.fields {
                cells.push(self.eval(cell, scope.as_deref_mut())?);
            }
            rows.push(cells);
        }
        Matrix::new(rows).map(Value::Matrix).ok_or_else(|| unexpected(node))
    }

    /// `lhs = \placeholder` captures `lhs`; `lhs = \placeholder / d` captures
    /// `lhs * d`. The result is always true.
    fn eval_capture(&mut self, node: &Node, mut scope: Option<&mut Scope>) -> EvalResult<Value> {
        let (slot, divisor) = node.placeholder_capture().ok_or_else(|| unexpected(node))?;
        let value = self.eval(required(node, node.lhs())?, scope.as_deref_mut())?;
        let value = match divisor {
            Some(divisor) => {
                let factor = self.eval(divisor, scope)?;
                Self::eval_binary(Tag::Mul, &value, &factor, node.coord)?
            },
            None => value,
        };

        if let Some(range) = &slot.extent {
            trace!(start = range.start, end = range.end, "captured placeholder");
            self.record(Replacement { kind: ReplacementKind::Value,
                                      range: range.clone(),
                                      value });
        }
        Ok(Value::truth(true))
    }
}

/// Returns a child that the parser always fills in.
pub(crate) fn required<'n>(node: &Node, child: Option<&'n Node>) -> EvalResult<&'n Node> {
    child.ok_or_else(|| unexpected(node))
}

pub(crate) fn unexpected(node: &Node) -> RuntimeError {
    RuntimeError::UnexpectedNode { tag:   node.operation(),
                                   coord: node.coord, }
}
