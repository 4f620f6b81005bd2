//! Element-wise math: ln, exp, sqrt, square

use super::activations::pointwise;
use crate::autograd::Tensor;

/// Natural logarithm
///
/// Callers guard against `ln(0)` by adding a small constant first.
pub fn ln(a: &Tensor) -> Tensor {
    pointwise(a, f32::ln, |x, _, _| 1.0 / x, 0.0)
}

/// Exponential
pub fn exp(a: &Tensor) -> Tensor {
    pointwise(a, f32::exp, |_, y, _| y, 0.0)
}

/// Square root
pub fn sqrt(a: &Tensor) -> Tensor {
    pointwise(a, f32::sqrt, |_, y, _| 0.5 / y, 0.0)
}

/// Element-wise square
pub fn square(a: &Tensor) -> Tensor {
    pointwise(a, |x| x * x, |x, _, _| 2.0 * x, 0.0)
}
