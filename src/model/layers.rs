//! Fully connected layers over named parameters

use rand::Rng;

use crate::autograd::{add_bias, matmul, Tensor};
use crate::distributions::sampling::standard_normal;
use crate::{Error, Result};

/// `y = x W + b` with `W` stored `in_dim x out_dim` row-major
#[derive(Debug, Clone)]
pub struct Linear {
    pub weight: Tensor,
    pub bias: Tensor,
    pub in_dim: usize,
    pub out_dim: usize,
}

impl Linear {
    /// Xavier-initialized layer whose parameters are named `{name}_w` / `{name}_b`
    pub fn new<R: Rng>(name: &str, in_dim: usize, out_dim: usize, rng: &mut R) -> Self {
        let std = (2.0 / (in_dim + out_dim).max(1) as f64).sqrt() as f32;
        let weight: Vec<f32> = (0..in_dim * out_dim).map(|_| standard_normal(rng) * std).collect();
        Self {
            weight: Tensor::parameter(format!("{name}_w"), weight),
            bias: Tensor::parameter(format!("{name}_b"), vec![0.0; out_dim]),
            in_dim,
            out_dim,
        }
    }

    /// Forward `n` rows
    pub fn forward(&self, x: &Tensor, n: usize) -> Result<Tensor> {
        let expected = n * self.in_dim;
        if x.len() != expected {
            return Err(Error::ShapeMismatch { expected, actual: x.len() });
        }
        let y = matmul(x, &self.weight, n, self.in_dim, self.out_dim);
        Ok(add_bias(&y, &self.bias, n, self.out_dim))
    }

    pub fn parameters(&self) -> [Tensor; 2] {
        [self.weight.clone(), self.bias.clone()]
    }
}

/// Stack of [`Linear`] layers for `dims[0] -> ... -> dims[last]`
pub fn stack<R: Rng>(prefix: &str, dims: &[usize], rng: &mut R) -> Vec<Linear> {
    dims.windows(2)
        .enumerate()
        .map(|(i, pair)| Linear::new(&format!("{prefix}{i}"), pair[0], pair[1], rng))
        .collect()
}
