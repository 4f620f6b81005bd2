//! Optimizers for training neural networks

mod adam;
mod clip;
#[cfg(test)]
mod convergence_tests;
mod optimizer;
mod rmsprop;
mod sgd;

pub use adam::Adam;
pub use clip::{clamp_weights, clip_grad_value};
pub use optimizer::Optimizer;
pub use rmsprop::RMSProp;
pub use sgd::SGD;
