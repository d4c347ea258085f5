use std::rc::Rc;

use indexmap::IndexMap;

use crate::{ast::Node, interpreter::value::dimension::Dimension};

/// Ordered name table mapping identifiers to values.
pub type Scope = IndexMap<String, Value>;

/// A runtime value, or a provisional value produced by dimensional analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A magnitude with its physical dimension.
    Number(f64, Dimension),
    Matrix(Matrix),
    Function(Rc<Function>),
    /// Nothing is known about the value yet.
    Undefined,
    /// A number whose dimension was inferred from use; magnitude unknown.
    InferredNumber(Dimension),
    /// A matrix whose element dimension and shape were inferred from use.
    InferredMatrix {
        dimension: Dimension,
        rows:      usize,
        cols:      usize,
    },
}

/// A user-defined function: parameters, the scope captured when it was
/// defined, and its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub params: Vec<String>,
    pub scope:  Scope,
    pub body:   Node,
}

/// A non-empty rectangular grid of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: Vec<Vec<Value>>,
}

impl Matrix {
    /// Builds a matrix, returning `None` for empty or ragged input.
    #[must_use]
    pub fn new(rows: Vec<Vec<Value>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { rows })
    }

    /// Builds a `1 x n` matrix from its entries.
    #[must_use]
    pub fn row_vector(values: Vec<Value>) -> Option<Self> {
        Self::new(vec![values])
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Value> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Returns the transposed matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let rows = (0..self.col_count()).map(|c| self.rows.iter().map(|row| row[c].clone()).collect())
                                        .collect();
        Self { rows }
    }

    /// Applies `f` to every element, keeping the shape.
    pub fn try_map<E>(&self, mut f: impl FnMut(&Value) -> Result<Value, E>) -> Result<Self, E> {
        let rows = self.rows
                       .iter()
                       .map(|row| row.iter().map(&mut f).collect::<Result<Vec<_>, E>>())
                       .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { rows })
    }

    /// Combines two matrices of equal shape element by element.
    pub fn try_zip<E>(&self,
                      other: &Self,
                      mut f: impl FnMut(&Value, &Value) -> Result<Value, E>)
                      -> Result<Self, E> {
        let rows = self.rows
                       .iter()
                       .zip(&other.rows)
                       .map(|(a, b)| a.iter().zip(b).map(|(x, y)| f(x, y)).collect::<Result<_, E>>())
                       .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { rows })
    }

    /// Element dimension, taken from the first entry.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.get(0, 0).and_then(Value::dimension).unwrap_or_default()
    }
}

impl Value {
    /// The neutral dimensionless zero returned by statements without a
    /// value.
    #[must_use]
    pub const fn zero() -> Self {
        Self::Number(0.0, Dimension::DIMENSIONLESS)
    }

    #[must_use]
    pub const fn scalar(value: f64) -> Self {
        Self::Number(value, Dimension::DIMENSIONLESS)
    }

    #[must_use]
    pub const fn truth(value: bool) -> Self {
        Self::scalar(if value { 1.0 } else { 0.0 })
    }

    /// `true` for real and inferred numbers.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(..) | Self::InferredNumber(_))
    }

    /// `true` for real and inferred matrices.
    #[must_use]
    pub const fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_) | Self::InferredMatrix { .. })
    }

    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Dimension of a number, or the element dimension of a matrix.
    #[must_use]
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::Number(_, d) | Self::InferredNumber(d) | Self::InferredMatrix { dimension: d, .. } => {
                Some(*d)
            },
            Self::Matrix(m) => Some(m.dimension()),
            Self::Function(_) | Self::Undefined => None,
        }
    }

    /// Magnitude of a number; inferred numbers count as zero.
    #[must_use]
    pub const fn magnitude(&self) -> Option<f64> {
        match self {
            Self::Number(v, _) => Some(*v),
            Self::InferredNumber(_) => Some(0.0),
            _ => None,
        }
    }

    /// `(rows, cols)` of a real or inferred matrix.
    #[must_use]
    pub fn shape(&self) -> Option<(usize, usize)> {
        match self {
            Self::Matrix(m) => Some((m.row_count(), m.col_count())),
            Self::InferredMatrix { rows, cols, .. } => Some((*rows, *cols)),
            _ => None,
        }
    }

    /// Truthiness used by conditions: any non-zero number.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        matches!(self, Self::Number(v, _) if *v != 0.0)
    }

    /// Short description of the value's kind for type errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(..) => "number",
            Self::Matrix(_) => "matrix",
            Self::Function(_) => "function",
            Self::Undefined => "undefined value",
            Self::InferredNumber(_) => "inferred number",
            Self::InferredMatrix { .. } => "inferred matrix",
        }
    }
}
