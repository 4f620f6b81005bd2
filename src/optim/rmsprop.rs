//! RMSProp optimizer

use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// RMSProp optimizer
///
/// ms_t = ρ ms_{t-1} + (1 - ρ) g²
/// θ_t = θ_{t-1} - lr g / √(ms_t + ε)
///
/// The mean-square accumulator starts at one, which keeps the first steps
/// small; Wasserstein critics are trained with this optimizer.
pub struct RMSProp {
    lr: f32,
    decay: f32,
    epsilon: f32,
    mean_square: Vec<Option<Array1<f32>>>,
}

impl RMSProp {
    /// Create a new RMSProp optimizer
    pub fn new(lr: f32, decay: f32, epsilon: f32) -> Self {
        Self { lr, decay, epsilon, mean_square: Vec::new() }
    }

    /// Create RMSProp with default parameters (ρ = 0.9, ε = 1e-10)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 1e-10)
    }

    /// Mean-square accumulators, indexed by parameter position
    #[must_use]
    pub fn accumulators(&self) -> &[Option<Array1<f32>>] {
        &self.mean_square
    }
}

impl Optimizer for RMSProp {
    fn step(&mut self, params: &mut [Tensor]) {
        if self.mean_square.len() < params.len() {
            self.mean_square.resize(params.len(), None);
        }

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad() else {
                continue;
            };

            let grad_sq = &grad * &grad;
            let ms_t = match &self.mean_square[i] {
                Some(ms) => ms * self.decay + &grad_sq * (1.0 - self.decay),
                None => Array1::<f32>::ones(grad.len()) * self.decay + &grad_sq * (1.0 - self.decay),
            };

            let update = &grad / &(ms_t.mapv(|v| (v + self.epsilon).sqrt())) * self.lr;
            let updated = &*param.data() - &update;
            *param.data_mut() = updated;

            self.mean_square[i] = Some(ms_t);
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn name(&self) -> &'static str {
        "rmsprop"
    }
}
