//! Backward op trait

use super::Tensor;
use ndarray::Array1;

/// Gradient rule of a single differentiable operation.
///
/// `backward` receives the gradient of the op's output and accumulates the
/// matching gradients into every input that requires one.
pub trait BackwardOp {
    /// Tensors this op read during the forward pass
    fn inputs(&self) -> Vec<Tensor>;

    /// Propagate `grad` (gradient of the output) into the inputs
    fn backward(&self, grad: &Array1<f32>);
}
