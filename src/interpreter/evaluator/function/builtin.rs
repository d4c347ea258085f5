use std::f64::consts::{E, PI};

/// How a built-in treats the dimensions of its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionRule {
    /// Arguments must be dimensionless; so is the result.
    Dimensionless,
    /// The result keeps the dimension of the single argument.
    Preserve,
    /// Both arguments must share a dimension, which the result keeps.
    Matching,
}

/// The numeric kernel of a built-in.
#[derive(Debug, Clone, Copy)]
pub enum Kernel {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

/// A built-in keyword function such as `\sin`.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name:   &'static str,
    pub rule:   DimensionRule,
    pub kernel: Kernel,
}

impl Builtin {
    /// Number of arguments the built-in takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self.kernel {
            Kernel::Unary(_) => 1,
            Kernel::Binary(_) => 2,
        }
    }

    /// Applies the kernel to magnitudes whose count already matches
    /// [`Builtin::arity`].
    #[must_use]
    pub fn apply(&self, args: &[f64]) -> Option<f64> {
        match (self.kernel, args) {
            (Kernel::Unary(f), [x]) => Some(f(*x)),
            (Kernel::Binary(f), [x, y]) => Some(f(*x, *y)),
            _ => None,
        }
    }
}

/// Defines the keyword tables.
///
/// Produces `BUILTIN_TABLE` with the functions and `CONSTANT_TABLE` with the
/// named constants.
macro_rules! builtin_keywords {
    (
        functions { $($name:literal => $rule:ident, $kind:ident($func:expr)),* $(,)? }
        constants { $($cname:literal => $value:expr),* $(,)? }
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, rule: DimensionRule::$rule, kernel: Kernel::$kind($func) },
            )*
        ];
        static CONSTANT_TABLE: &[(&str, f64)] = &[
            $(($cname, $value),)*
        ];
    };
}

builtin_keywords! {
    functions {
        "\\cos"    => Dimensionless, Unary(f64::cos),
        "\\sin"    => Dimensionless, Unary(f64::sin),
        "\\tan"    => Dimensionless, Unary(f64::tan),
        "\\cot"    => Dimensionless, Unary(|x: f64| 1.0 / x.tan()),
        "\\ln"     => Dimensionless, Unary(f64::ln),
        "\\arcsin" => Dimensionless, Unary(f64::asin),
        "\\arccos" => Dimensionless, Unary(f64::acos),
        "\\arctan" => Dimensionless, Unary(f64::atan),
        "\\cosh"   => Dimensionless, Unary(f64::cosh),
        "\\sinh"   => Dimensionless, Unary(f64::sinh),
        "\\tanh"   => Dimensionless, Unary(f64::tanh),
        "\\floor"  => Preserve, Unary(f64::floor),
        "\\ceil"   => Preserve, Unary(f64::ceil),
        "\\max"    => Matching, Binary(f64::max),
        "\\min"    => Matching, Binary(f64::min),
    }
    constants {
        "\\true"  => 1.0,
        "\\false" => 0.0,
        "\\pi"    => PI,
        "\\exp"   => E,
    }
}

/// Looks up a built-in function by its keyword, backslash included.
///
/// ```
/// use texcalc::interpreter::evaluator::function::builtin::lookup_builtin;
///
/// assert_eq!(lookup_builtin("\\max").map(|b| b.arity()), Some(2));
/// assert!(lookup_builtin("\\sqrt").is_none());
/// ```
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTIN_TABLE.iter().find(|b| b.name == name)
}

/// Looks up a named constant such as `\pi`.
#[must_use]
pub fn lookup_constant(name: &str) -> Option<f64> {
    CONSTANT_TABLE.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}
