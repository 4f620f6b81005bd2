//! Optimizer trait

use crate::Tensor;

/// Trait for optimization algorithms
///
/// An optimizer owns its moment/accumulator state for the lifetime of a
/// training run. State is indexed by parameter position, so a given
/// optimizer must always be stepped with the same parameter list in the same
/// order. Parameters whose gradient is absent are left untouched, including
/// their optimizer state.
pub trait Optimizer {
    /// Perform a single optimization step
    fn step(&mut self, params: &mut [Tensor]);

    /// Zero out all gradients
    fn zero_grad(&mut self, params: &mut [Tensor]) {
        for param in params {
            param.zero_grad();
        }
    }

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);

    /// Short algorithm name used in logs and checkpoint metadata
    fn name(&self) -> &'static str;
}
