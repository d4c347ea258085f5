use std::fmt;

/// Symbols of the SI base units in the fixed order used by [`Dimension`].
pub const BASE_UNITS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];

/// Physical dimension as integer exponents over the seven SI base units.
///
/// Component `i` is the exponent of [`BASE_UNITS`]`[i]`, so `m^2 \cdot s^-1`
/// is `[2, 0, -1, 0, 0, 0, 0]`.
///
/// # Example
/// ```
/// use texcalc::interpreter::value::dimension::Dimension;
///
/// let metre = Dimension::from_unit("m").unwrap();
/// let second = Dimension::from_unit("s").unwrap();
///
/// let speed = metre.checked_sub(second).unwrap();
/// assert_eq!(speed.exponents(), [1, 0, -1, 0, 0, 0, 0]);
/// assert!(speed.checked_sub(speed).unwrap().is_dimensionless());
///
/// let huge = metre.checked_scale(i32::MAX).unwrap();
/// assert_eq!(huge.checked_add(metre), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension([i32; 7]);

impl Dimension {
    /// The dimension of pure numbers.
    pub const DIMENSIONLESS: Self = Self([0; 7]);

    #[must_use]
    pub const fn new(exponents: [i32; 7]) -> Self {
        Self(exponents)
    }

    /// Looks up a base unit symbol and returns its one-hot dimension.
    #[must_use]
    pub fn from_unit(symbol: &str) -> Option<Self> {
        BASE_UNITS.iter().position(|unit| *unit == symbol).map(|index| {
                                                               let mut exponents = [0; 7];
                                                               exponents[index] = 1;
                                                               Self(exponents)
                                                           })
    }

    #[must_use]
    pub const fn exponents(self) -> [i32; 7] {
        self.0
    }

    #[must_use]
    pub fn is_dimensionless(self) -> bool {
        self.0.iter().all(|e| *e == 0)
    }

    /// Multiplies every exponent by `factor`, the dimension of `x^factor`.
    /// `None` when an exponent leaves the `i32` range.
    #[must_use]
    pub fn checked_scale(self, factor: i32) -> Option<Self> {
        self.zip_with(Self::DIMENSIONLESS, |e, _| e.checked_mul(factor))
    }

    /// The dimension of a product.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.zip_with(rhs, i32::checked_add)
    }

    /// The dimension of a quotient.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.zip_with(rhs, i32::checked_sub)
    }

    fn zip_with(self, rhs: Self, op: impl Fn(i32, i32) -> Option<i32>) -> Option<Self> {
        let mut exponents = [0; 7];
        for ((out, l), r) in exponents.iter_mut().zip(self.0).zip(rhs.0) {
            *out = op(l, r)?;
        }
        Some(Self(exponents))
    }
}

fn write_units(f: &mut fmt::Formatter<'_>, units: &[(&str, i32)]) -> fmt::Result {
    for (i, (symbol, exponent)) in units.iter().enumerate() {
        if i > 0 {
            write!(f, " \\cdot ")?;
        }
        match exponent {
            1 => write!(f, "{symbol}")?,
            2..=9 => write!(f, "{symbol}^{exponent}")?,
            _ => write!(f, "{symbol}^{{{exponent}}}")?,
        }
    }
    Ok(())
}

/// Renders the unit part of a quantity in LaTeX, without the leading
/// multiplication sign.
///
/// Negative exponents move into the denominator of a `\frac`.
///
/// ```
/// use texcalc::interpreter::value::dimension::Dimension;
///
/// let accel = Dimension::new([1, 0, -2, 0, 0, 0, 0]);
/// assert_eq!(accel.to_string(), "\\frac{m}{s^2}");
///
/// let frequency = Dimension::new([0, 0, -1, 0, 0, 0, 0]);
/// assert_eq!(frequency.to_string(), "\\frac{1}{s}");
/// ```
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numerator: Vec<(&str, i32)> = BASE_UNITS.iter()
                                                    .zip(self.0)
                                                    .filter(|(_, e)| *e > 0)
                                                    .map(|(u, e)| (*u, e))
                                                    .collect();
        let denominator: Vec<(&str, i32)> = BASE_UNITS.iter()
                                                      .zip(self.0)
                                                      .filter(|(_, e)| *e < 0)
                                                      .map(|(u, e)| (*u, -e))
                                                      .collect();

        if denominator.is_empty() {
            return write_units(f, &numerator);
        }

        write!(f, "\\frac{{")?;
        if numerator.is_empty() {
            write!(f, "1")?;
        } else {
            write_units(f, &numerator)?;
        }
        write!(f, "}}{{")?;
        write_units(f, &denominator)?;
        write!(f, "}}")
    }
}
