use indexmap::IndexMap;
use tracing::debug;

use crate::{
    ast::Node,
    error::SemanticError,
    interpreter::{
        lexer::tag::Tag,
        value::{
            core::{Matrix, Value},
            dimension::Dimension,
        },
    },
};

pub type AnalysisResult<T> = Result<T, SemanticError>;

/// Ordered `(name, provisional value)` pairs for names bound inside a block
/// or function body.
pub type Bindings = Vec<(String, Value)>;

/// The outcome of analyzing one node: its provisional value and the local
/// bindings after it.
pub type Analysis = (Value, Bindings);

/// Declared shape of a user function.
///
/// Parameters and result are provisional values; [`Value::Undefined`]
/// entries accept anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Vec<(String, Value)>,
    pub result: Value,
}

/// Checks dimensions and shapes of a syntax tree before it runs.
///
/// Every node is visited once. Loops are not iterated, placeholders and
/// graphics are not captured. Global identifiers and function signatures
/// persist between calls to [`Analyzer::analyze_program`], so later regions
/// see earlier definitions.
#[derive(Debug, Default)]
pub struct Analyzer {
    /// Provisional values of global identifiers.
    pub identifiers: IndexMap<String, Value>,
    /// Signatures of user functions.
    pub functions:   IndexMap<String, Signature>,
}

impl Analyzer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes every top-level statement of a region.
    ///
    /// # Example
    /// ```
    /// use texcalc::interpreter::{
    ///     analyzer::core::Analyzer,
    ///     lexer::{core::Lexer, token::Coordinate},
    ///     parser::core::parse_program,
    /// };
    ///
    /// let tokens = Lexer::new("x := 2 \\cdot m \\\\ y := x + 3 \\cdot s", Coordinate::default()).tokenize().unwrap();
    /// let root = parse_program(&tokens).unwrap();
    ///
    /// assert!(Analyzer::new().analyze_program(&root).is_err());
    /// ```
    pub fn analyze_program(&mut self, root: &Node) -> AnalysisResult<()> {
        for statement in &root.fields {
            self.analyze(statement, false, Vec::new())?;
        }
        debug!(statements = root.fields.len(), globals = self.identifiers.len(), "analyzed region");
        Ok(())
    }

    /// Analyzes one node.
    ///
    /// # Parameters
    /// - `node`: The node to check.
    /// - `inside`: `true` within a block or function body, where new names
    ///   become local bindings.
    /// - `locals`: Local bindings visible at this node.
    ///
    /// # Returns
    /// The provisional value of the node and the local bindings after it.
    pub fn analyze(&mut self, node: &Node, inside: bool, locals: Bindings) -> AnalysisResult<Analysis> {
        match node.tag {
            Tag::Number => Ok((Value::scalar(literal(node)?), locals)),
            Tag::Dimension => {
                let dimension = Dimension::from_unit(&node.label).ok_or_else(|| unexpected(node))?;
                Ok((Value::Number(1.0, dimension), locals))
            },
            Tag::Placeholder => Ok((Value::InferredNumber(Dimension::DIMENSIONLESS), locals)),
            Tag::Ident => self.analyze_identifier(node, inside, locals),
            Tag::Func => self.analyze_call(node, inside, locals),
            Tag::Keyword => self.analyze_keyword(node, inside, locals),
            Tag::UAdd | Tag::USub | Tag::Abs | Tag::Not | Tag::Transp => self.analyze_prefix(node, inside, locals),
            Tag::Add | Tag::Sub => self.analyze_additive(node, inside, locals),
            Tag::Eq if node.placeholder_capture().is_some() => self.analyze_capture(node, inside, locals),
            Tag::Lt | Tag::Gt | Tag::Leq | Tag::Geq | Tag::Eq | Tag::Neq | Tag::And | Tag::Or => {
                self.analyze_comparison(node, inside, locals)
            },
            Tag::Mul | Tag::Div | Tag::Frac => self.analyze_multiplicative(node, inside, locals),
            Tag::Pow => self.analyze_power(node, inside, locals),
            Tag::Set => self.analyze_assignment(node, inside, locals),
            Tag::BeginB => self.analyze_block(node, locals),
            Tag::BeginC => self.analyze_cases(node, inside, locals),
            Tag::BeginM => self.analyze_matrix(node, inside, locals),
            Tag::If => self.analyze_if(node, inside, locals),
            Tag::While => self.analyze_while(node, inside, locals),
            Tag::Sum | Tag::Product => self.analyze_accumulation(node, inside, locals),
            Tag::Range => self.analyze_range(node, inside, locals),
            Tag::Graphic => self.analyze_graphic(node, inside, locals),
            _ => Err(unexpected(node)),
        }
    }

    /// Analyzes a sequence of nodes, threading the bindings through.
    pub(in crate::interpreter::analyzer) fn analyze_all(&mut self,
                                                        nodes: &[Node],
                                                        inside: bool,
                                                        mut locals: Bindings)
                                                        -> AnalysisResult<(Vec<Value>, Bindings)> {
        let mut values = Vec::with_capacity(nodes.len());
        for node in nodes {
            let (value, next) = self.analyze(node, inside, locals)?;
            values.push(value);
            locals = next;
        }
        Ok((values, locals))
    }

    /// Resolves a name, local bindings first.
    pub(in crate::interpreter::analyzer) fn lookup(&self, name: &str, locals: &Bindings) -> Option<Value> {
        locals.iter()
              .rev()
              .find(|(n, _)| n == name)
              .map(|(_, v)| v.clone())
              .or_else(|| self.identifiers.get(name).cloned())
    }

    /// Records a provisional value for a name that is already bound.
    ///
    /// The binding is updated wherever it lives. An unbound name becomes
    /// local inside a body and global otherwise.
    pub(in crate::interpreter::analyzer) fn rebind(&mut self,
                                                   name: &str,
                                                   value: Value,
                                                   inside: bool,
                                                   locals: &mut Bindings) {
        if let Some(slot) = locals.iter_mut().rev().find(|(n, _)| n == name) {
            slot.1 = value;
        } else if let Some(slot) = self.identifiers.get_mut(name) {
            *slot = value;
        } else if inside {
            locals.push((name.to_string(), value));
        } else {
            self.identifiers.insert(name.to_string(), value);
        }
    }

    /// Records the value of an assignment.
    ///
    /// A global name always receives the write. Otherwise the name is bound
    /// locally inside a body and globally at top level.
    pub(in crate::interpreter::analyzer) fn define(&mut self,
                                                   name: &str,
                                                   value: Value,
                                                   inside: bool,
                                                   locals: &mut Bindings) {
        if !inside || self.identifiers.contains_key(name) {
            self.identifiers.insert(name.to_string(), value);
        } else if let Some(slot) = locals.iter_mut().rev().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            locals.push((name.to_string(), value));
        }
    }

    /// Gives an undefined bare identifier the provisional value `inferred`.
    ///
    /// Returns the operand's value after inference.
    pub(in crate::interpreter::analyzer) fn infer(&mut self,
                                                  operand: &Node,
                                                  value: Value,
                                                  inferred: Option<Value>,
                                                  inside: bool,
                                                  locals: &mut Bindings)
                                                  -> Value {
        match inferred {
            Some(inferred) if value.is_undefined() && operand.is_bare_identifier() => {
                self.rebind(&operand.label, inferred.clone(), inside, locals);
                inferred
            },
            _ => value,
        }
    }

    /// Analyzes an identifier and its optional index components.
    fn analyze_identifier(&mut self, node: &Node, inside: bool, locals: Bindings) -> AnalysisResult<Analysis> {
        let value = match self.lookup(&node.label, &locals) {
            Some(value) => value,
            None if self.functions.contains_key(&node.label) => Value::Undefined,
            None => {
                return Err(SemanticError::UndefinedIdentifier { name:  node.label.clone(),
                                                                coord: node.coord, });
            },
        };

        if node.fields.is_empty() {
            return Ok((value, locals));
        }

        let (indices, locals) = self.analyze_all(&node.fields, inside, locals)?;
        if let Some(index) = indices.iter().find(|v| !v.is_numeric() && !v.is_undefined()) {
            return Err(SemanticError::InvalidOperands { operation: "index".to_string(),
                                                        details:   format!("{index} is not a number"),
                                                        coord:     node.coord, });
        }

        match value {
            Value::Undefined => Ok((Value::Undefined, locals)),
            Value::Matrix(_) | Value::InferredMatrix { .. } => {
                let dimension = value.dimension().unwrap_or_default();
                Ok((Value::InferredNumber(dimension), locals))
            },
            other => Err(SemanticError::InvalidOperands { operation: "index".to_string(),
                                                          details:   format!("{} is a {}", node.label, other.kind()),
                                                          coord:     node.coord, }),
        }
    }

    /// Builds the provisional value of a `pmatrix` literal from its cells.
    pub(in crate::interpreter::analyzer) fn analyze_matrix(&mut self,
                                                           node: &Node,
                                                           inside: bool,
                                                           mut locals: Bindings)
                                                           -> AnalysisResult<Analysis> {
        let mut rows = Vec::with_capacity(node.fields.len());
        for row in &node.fields {
            let (cells, next) = self.analyze_all(&row.fields, inside, locals)?;
            rows.push(cells);
            locals = next;
        }
        let matrix = Matrix::new(rows).ok_or_else(|| unexpected(node))?;
        Ok((Value::Matrix(matrix), locals))
    }
}

/// The provisional value an undefined operand takes next to `other`.
///
/// Numbers yield an inferred number of the same dimension, matrices an
/// inferred matrix of the same shape. With `dimensionless` set, the
/// inferred dimension is dropped.
pub(in crate::interpreter::analyzer) fn inferred_like(other: &Value, dimensionless: bool) -> Option<Value> {
    let dimension = if dimensionless {
        Dimension::DIMENSIONLESS
    } else {
        other.dimension()?
    };
    match other.shape() {
        Some((rows, cols)) => Some(Value::InferredMatrix { dimension, rows, cols }),
        None if other.is_numeric() => Some(Value::InferredNumber(dimension)),
        None => None,
    }
}

/// Returns a child that the parser always fills in.
pub(in crate::interpreter::analyzer) fn required<'n>(node: &Node, child: Option<&'n Node>) -> AnalysisResult<&'n Node> {
    child.ok_or_else(|| unexpected(node))
}

pub(in crate::interpreter::analyzer) fn unexpected(node: &Node) -> SemanticError {
    SemanticError::UnexpectedNode { tag:   node.operation(),
                                    coord: node.coord, }
}

fn literal(node: &Node) -> AnalysisResult<f64> {
    node.label.parse().map_err(|_| unexpected(node))
}
