//! Gradient step over a fixed variable set

use crate::autograd::{add_n, backward, Tensor};
use crate::optim::{clip_grad_value, Optimizer};

use super::config::ClipRange;

/// One player's update rule: optimizer, owned variables and optional
/// element-wise gradient clip.
///
/// Executing the step sums the loss terms, backpropagates, clips the present
/// gradients and lets the optimizer update the variables. Variables the loss
/// does not reach keep an absent gradient and are not touched.
pub struct TrainStep {
    optimizer: Box<dyn Optimizer>,
    variables: Vec<Tensor>,
    clip: Option<ClipRange>,
    executions: usize,
}

/// Bind an optimizer to the variables it may update
pub fn build_step(
    optimizer: Box<dyn Optimizer>,
    variables: Vec<Tensor>,
    clip: Option<ClipRange>,
) -> TrainStep {
    TrainStep { optimizer, variables, clip, executions: 0 }
}

impl TrainStep {
    /// Apply one update for the summed loss terms, returning the loss value
    pub fn execute(&mut self, loss_terms: &[Tensor]) -> f32 {
        let total = add_n(loss_terms);
        // gradients left by the other player's pass must not leak in
        self.optimizer.zero_grad(&mut self.variables);
        backward(&total, None);
        if let Some(clip) = self.clip {
            clip_grad_value(&mut self.variables, clip.lo(), clip.hi());
        }
        self.optimizer.step(&mut self.variables);
        self.executions += 1;
        total.item()
    }

    pub fn variables(&self) -> &[Tensor] {
        &self.variables
    }

    /// How many times the step has been applied
    pub fn executions(&self) -> usize {
        self.executions
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::{mul, sum};
    use crate::optim::SGD;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_terms_are_summed() {
        let w = Tensor::parameter("d_w", vec![1.0]);
        let mut step = build_step(Box::new(SGD::new(0.1, 0.0)), vec![w.clone()], None);
        let a = sum(&mul(&w, &w));
        let b = sum(&w);
        let value = step.execute(&[a, b]);
        assert_abs_diff_eq!(value, 2.0);
        // d/dw (w² + w) = 3 at w = 1
        assert_abs_diff_eq!(w.data()[0], 1.0 - 0.3, epsilon = 1e-6);
        assert_eq!(step.executions(), 1);
    }

    #[test]
    fn test_unreached_variable_untouched() {
        let used = Tensor::parameter("g_used", vec![1.0]);
        let unused = Tensor::parameter("g_unused", vec![5.0]);
        let mut step =
            build_step(Box::new(SGD::new(0.1, 0.0)), vec![used.clone(), unused.clone()], None);
        step.execute(&[sum(&used)]);
        assert_abs_diff_eq!(unused.data()[0], 5.0);
        assert!(unused.grad().is_none());
    }

    #[test]
    fn test_stale_gradient_cleared() {
        let w = Tensor::parameter("d_w", vec![0.0]);
        w.set_grad(ndarray::Array1::from(vec![100.0]));
        let mut step = build_step(Box::new(SGD::new(1.0, 0.0)), vec![w.clone()], None);
        step.execute(&[sum(&w)]);
        assert_abs_diff_eq!(w.data()[0], -1.0);
    }

    #[test]
    fn test_other_variables_not_updated() {
        let d = Tensor::parameter("d_w", vec![1.0]);
        let g = Tensor::parameter("g_w", vec![1.0]);
        let mut step = build_step(Box::new(SGD::new(0.5, 0.0)), vec![d.clone()], None);
        step.execute(&[sum(&mul(&d, &g))]);
        assert_abs_diff_eq!(g.data()[0], 1.0);
        assert_abs_diff_eq!(d.data()[0], 0.5);
    }

    proptest! {
        #[test]
        fn prop_clipped_update_bounded(grad_scale in -1000.0f32..1000.0, lo in -1.0f32..0.0, hi in 0.0f32..1.0) {
            let w = Tensor::parameter("d_w", vec![0.0, 0.0]);
            let coeffs = Tensor::from_vec(vec![grad_scale, -grad_scale], false);
            let mut step = build_step(
                Box::new(SGD::new(1.0, 0.0)),
                vec![w.clone()],
                Some(ClipRange(lo, hi)),
            );
            step.execute(&[sum(&mul(&w, &coeffs))]);
            // with lr 1 the applied update is minus the clipped gradient
            for &v in w.data().iter() {
                prop_assert!(-v >= lo - 1e-6 && -v <= hi + 1e-6);
            }
        }
    }
}
