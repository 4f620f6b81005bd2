//! Gradient and weight clipping utilities

use crate::Tensor;

/// Clamp every present gradient element-wise into `[lo, hi]`
///
/// Parameters without a gradient keep an absent gradient; nothing is
/// materialized for them.
///
/// # Returns
/// Number of gradient components that were changed by the clamp
pub fn clip_grad_value(params: &mut [Tensor], lo: f32, hi: f32) -> usize {
    let mut clipped = 0;

    for param in params.iter_mut() {
        if let Some(grad) = param.grad() {
            clipped += grad.iter().filter(|&&g| g < lo || g > hi).count();
            param.set_grad(grad.mapv(|g| g.clamp(lo, hi)));
        }
    }

    clipped
}

/// Clamp parameter values element-wise into `[lo, hi]`, in place
pub fn clamp_weights(params: &[Tensor], lo: f32, hi: f32) {
    for param in params {
        param.data_mut().mapv_inplace(|w| w.clamp(lo, hi));
    }
}
