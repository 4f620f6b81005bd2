//! Ring of Gaussians, the usual 2-D toy target for GANs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Batch, Dataset};
use crate::autograd::Tensor;
use crate::distributions::sampling::standard_normal;
use crate::{Error, Result};

/// `modes` isotropic Gaussians evenly spaced on a circle
#[derive(Debug, Clone)]
pub struct GaussianMixture {
    modes: usize,
    radius: f32,
    std: f32,
    rng: StdRng,
}

impl GaussianMixture {
    pub fn new(modes: usize, radius: f32, std: f32, seed: u64) -> Result<Self> {
        if modes == 0 {
            return Err(Error::Config("gaussian mixture needs at least one mode".into()));
        }
        if std.is_nan() || std < 0.0 {
            return Err(Error::Config(format!("mixture std must be >= 0, got {std}")));
        }
        Ok(Self { modes, radius, std, rng: StdRng::seed_from_u64(seed) })
    }

    /// Center of mode `k`
    pub fn center(&self, k: usize) -> (f32, f32) {
        let theta = 2.0 * std::f32::consts::PI * k as f32 / self.modes as f32;
        (self.radius * theta.cos(), self.radius * theta.sin())
    }
}

impl Dataset for GaussianMixture {
    fn dim(&self) -> usize {
        2
    }

    fn next_batch(&mut self, batch_size: usize) -> Result<Batch> {
        let mut values = Vec::with_capacity(batch_size * 2);
        let mut labels = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            let k = self.rng.random_range(0..self.modes);
            let (cx, cy) = self.center(k);
            values.push(cx + self.std * standard_normal(&mut self.rng));
            values.push(cy + self.std * standard_normal(&mut self.rng));
            labels.push(k);
        }
        Ok(Batch::new(Tensor::from_vec(values, false), batch_size, 2).with_labels(labels))
    }
}
