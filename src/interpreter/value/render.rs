use std::fmt;

use crate::interpreter::value::core::{Matrix, Value};

/// Digits kept after the decimal point.
pub const FRACTION_DIGITS: usize = 5;

/// Formats a magnitude for splicing into a document.
///
/// Integral values lose their fractional part, everything else keeps
/// exactly [`FRACTION_DIGITS`] digits.
///
/// ```
/// use texcalc::interpreter::value::render::format_number;
///
/// assert_eq!(format_number(11.0), "11");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(1.0 / 3.0), "0.33333");
/// assert_eq!(format_number(2.5), "2.50000");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    format!("{value:.FRACTION_DIGITS$}")
}

/// Formats a plot coordinate, dropping trailing zeros.
///
/// ```
/// use texcalc::interpreter::value::render::format_coordinate;
///
/// assert_eq!(format_coordinate(0.30000000000000004), "0.3");
/// assert_eq!(format_coordinate(0.010000000000000002), "0.01");
/// assert_eq!(format_coordinate(1.0), "1");
/// ```
#[must_use]
pub fn format_coordinate(value: f64) -> String {
    let text = format_number(value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" { "0".to_string() } else { trimmed.to_string() }
    } else {
        text
    }
}

/// Renders the samples of a `\graphic` as `(x,y)` lines.
///
/// The matrix holds one `[x, y]` row per sample.
#[must_use]
pub fn render_plot(points: &Matrix) -> String {
    points.rows()
          .iter()
          .map(|row| {
              let coordinate = |i: usize| {
                  row.get(i).and_then(Value::magnitude).map_or_else(String::new, format_coordinate)
              };
              format!("({},{})", coordinate(0), coordinate(1))
          })
          .collect::<Vec<_>>()
          .join("\n")
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\\begin{{pmatrix}}")?;
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f, "\\\\")?;
            }
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            write!(f, "{}", cells.join(" & "))?;
        }
        write!(f, "\\end{{pmatrix}}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v, d) => {
                write!(f, "{}", format_number(*v))?;
                if !d.is_dimensionless() {
                    write!(f, " \\cdot {d}")?;
                }
                Ok(())
            },
            Self::Matrix(m) => write!(f, "{m}"),
            Self::Function(func) => write!(f, "function({})", func.params.join(", ")),
            Self::Undefined => write!(f, "undefined"),
            Self::InferredNumber(d) => {
                if d.is_dimensionless() { write!(f, "number") } else { write!(f, "number \\cdot {d}") }
            },
            Self::InferredMatrix { dimension, rows, cols } => {
                write!(f, "{rows}x{cols} matrix")?;
                if !dimension.is_dimensionless() {
                    write!(f, " \\cdot {dimension}")?;
                }
                Ok(())
            },
        }
    }
}
