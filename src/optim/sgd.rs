//! Stochastic Gradient Descent optimizer

use super::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// SGD optimizer with optional momentum
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<Array1<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, velocities: Vec::new() }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Tensor]) {
        if self.velocities.len() < params.len() {
            self.velocities.resize(params.len(), None);
        }

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad() else {
                continue;
            };

            let updated = if self.momentum > 0.0 {
                // v = momentum * v - lr * grad
                let velocity = match &self.velocities[i] {
                    Some(v) => v * self.momentum - &grad * self.lr,
                    None => &grad * (-self.lr),
                };
                let updated = &*param.data() + &velocity;
                self.velocities[i] = Some(velocity);
                updated
            } else {
                // Simple SGD: param -= lr * grad
                &*param.data() - &(&grad * self.lr)
            };
            *param.data_mut() = updated;
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_sgd_plain_step() {
        let mut opt = SGD::new(0.5, 0.0);
        let mut params = vec![Tensor::from_vec(vec![1.0, 2.0], true)];
        params[0].set_grad(arr1(&[1.0, -2.0]));

        opt.step(&mut params);

        assert_abs_diff_eq!(params[0].data()[0], 0.5);
        assert_abs_diff_eq!(params[0].data()[1], 3.0);
    }

    #[test]
    fn test_sgd_momentum_accumulates() {
        let mut opt = SGD::new(0.1, 0.9);
        let mut params = vec![Tensor::from_vec(vec![0.0], true)];

        params[0].set_grad(arr1(&[1.0]));
        opt.step(&mut params);
        params[0].set_grad(arr1(&[1.0]));
        opt.step(&mut params);

        // v1 = -0.1, v2 = -0.09 - 0.1 = -0.19; x = -0.29
        assert_abs_diff_eq!(params[0].data()[0], -0.29, epsilon = 1e-6);
    }
}
