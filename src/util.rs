/// Numeric conversion helpers.
///
/// Conversions between `f64` and the integer types used for indices, loop
/// counts and dimension exponents. Each helper takes the error to return
/// when the conversion would lose information, so callers keep their own
/// error types.
pub mod num;
