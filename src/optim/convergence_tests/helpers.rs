//! Analytic objectives for optimizer convergence checks

use crate::optim::Optimizer;
use crate::Tensor;
use ndarray::Array1;

/// `f(x) = sum(a_i * x_i^2)`, minimised at the origin
pub struct Bowl {
    pub curvature: Vec<f32>,
}

impl Bowl {
    pub fn isotropic(dim: usize) -> Self {
        Self { curvature: vec![1.0; dim] }
    }

    pub fn value(&self, x: &Tensor) -> f32 {
        x.data().iter().zip(&self.curvature).map(|(x, a)| a * x * x).sum()
    }

    fn gradient(&self, x: &Tensor) -> Array1<f32> {
        x.data().iter().zip(&self.curvature).map(|(x, a)| 2.0 * a * x).collect()
    }

    /// Run `steps` updates from `start`; returns the loss after every step
    pub fn descend(
        &self,
        optimizer: &mut dyn Optimizer,
        start: &[f32],
        steps: usize,
    ) -> (Tensor, Vec<f32>) {
        let mut params = vec![Tensor::from_vec(start.to_vec(), true)];
        let mut losses = Vec::with_capacity(steps);
        for _ in 0..steps {
            optimizer.zero_grad(&mut params);
            let grad = self.gradient(&params[0]);
            params[0].set_grad(grad);
            optimizer.step(&mut params);
            losses.push(self.value(&params[0]));
        }
        (params.swap_remove(0), losses)
    }
}

/// Step a two-parameter list where only the first parameter ever receives a
/// gradient; returns the second parameter afterwards
pub fn step_with_idle_parameter(optimizer: &mut dyn Optimizer, steps: usize) -> f32 {
    let mut params = vec![Tensor::from_vec(vec![1.0], true), Tensor::from_vec(vec![0.25], true)];
    for _ in 0..steps {
        optimizer.zero_grad(&mut params);
        let x = params[0].data()[0];
        params[0].set_grad(ndarray::arr1(&[2.0 * x]));
        optimizer.step(&mut params);
    }
    let value = params[1].data()[0];
    value
}
