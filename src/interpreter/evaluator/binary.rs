/// Element-wise arithmetic on matrices.
pub mod array;
/// Comparisons and structural equality.
pub mod comparison;
/// Dispatch of binary operators on evaluated operands.
pub mod core;
/// `\land` and `\lor`.
pub mod logic;
/// Matrix products.
pub mod matmul;
/// Exponentiation with dimension checks.
pub mod power;
/// Arithmetic between numbers.
///
/// Handles `+`, `-`, `\cdot`, `/` and `\frac`, including the dimension
/// rules and division by zero.
pub mod scalar;
