/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Converts an `f64` to `i32` if the value is finite, integral and in range.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, fractional or out-of-range values.
///
/// ## Example
/// ```
/// use texcalc::util::num::f64_to_i32_checked;
///
/// assert_eq!(f64_to_i32_checked(3.0, "bad"), Ok(3));
/// assert_eq!(f64_to_i32_checked(2.5, "bad"), Err("bad"));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i32_checked<E>(value: f64, error: E) -> Result<i32, E> {
    if !value.is_finite() || value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(error);
    }
    Ok(value as i32)
}

/// Converts a non-negative `f64` to `usize`, dropping any fractional part.
///
/// ## Errors
/// Returns `Err(error)` for negative, non-finite or oversized values.
///
/// ## Example
/// ```
/// use texcalc::util::num::f64_to_usize_truncated;
///
/// assert_eq!(f64_to_usize_truncated(2.7, ()), Ok(2));
/// assert!(f64_to_usize_truncated(-1.0, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn f64_to_usize_truncated<E>(value: f64, error: E) -> Result<usize, E> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    usize::try_from(value.trunc() as u64).map_err(|_| error)
}

/// Converts a `usize` to `f64` if and only if it is exactly representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_U64_INT`].
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    match u64::try_from(value) {
        Ok(v) if v <= MAX_SAFE_U64_INT => Ok(v as f64),
        _ => Err(error),
    }
}
