//! Single-family latent distributions

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::info::{DistInfo, TINY};
use super::sampling::{standard_normal, uniform};
use crate::autograd::{
    add, add_scalar, div, exp, ln, mul, scale, sigmoid, slice_cols, softmax_rows, sqrt, square, sub,
    sum_rows, Tensor,
};
use crate::{Error, Result};

const HALF_LN_2PI: f32 = 0.918_938_5;

/// A latent or output distribution over `dim` columns of a row-major batch.
///
/// `Uniform` draws its prior from U(-1, 1) but is paired with a Gaussian
/// posterior, which is what the discriminator's latent head predicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    Categorical {
        dim: usize,
    },
    Uniform {
        dim: usize,
        #[serde(default)]
        fix_std: bool,
    },
    Gaussian {
        dim: usize,
        #[serde(default)]
        fix_std: bool,
    },
    MeanBernoulli {
        dim: usize,
    },
}

impl Distribution {
    /// Columns a sample occupies
    pub fn dim(&self) -> usize {
        match *self {
            Distribution::Categorical { dim }
            | Distribution::Uniform { dim, .. }
            | Distribution::Gaussian { dim, .. }
            | Distribution::MeanBernoulli { dim } => dim,
        }
    }

    /// Columns of the flat parameter vector [`Distribution::activate_dist`] consumes
    pub fn dist_flat_dim(&self) -> usize {
        match *self {
            Distribution::Uniform { dim, fix_std } | Distribution::Gaussian { dim, fix_std } => {
                if fix_std {
                    dim
                } else {
                    2 * dim
                }
            }
            _ => self.dim(),
        }
    }

    /// Categorical codes are the discrete partition, everything else is continuous
    pub fn is_discrete(&self) -> bool {
        matches!(self, Distribution::Categorical { .. })
    }

    /// Parameter names this distribution's info carries
    pub fn info_keys(&self) -> &'static [&'static str] {
        match self {
            Distribution::Categorical { .. } => &["prob"],
            Distribution::Uniform { .. } | Distribution::Gaussian { .. } => &["mean", "stddev"],
            Distribution::MeanBernoulli { .. } => &["p"],
        }
    }

    /// Draw `n` rows from the prior
    pub fn sample_prior<R: Rng>(&self, n: usize, rng: &mut R) -> Tensor {
        let dim = self.dim();
        let mut values = Vec::with_capacity(n * dim);
        for _ in 0..n {
            match self {
                Distribution::Categorical { .. } => {
                    let hot = rng.random_range(0..dim.max(1));
                    values.extend((0..dim).map(|c| if c == hot { 1.0 } else { 0.0 }));
                }
                Distribution::Uniform { .. } => {
                    values.extend((0..dim).map(|_| uniform(rng, -1.0, 1.0)));
                }
                Distribution::Gaussian { .. } => {
                    values.extend((0..dim).map(|_| standard_normal(rng)));
                }
                Distribution::MeanBernoulli { .. } => {
                    values.extend((0..dim).map(|_| if rng.random::<f32>() < 0.5 { 1.0 } else { 0.0 }));
                }
            }
        }
        Tensor::from_vec(values, false)
    }

    /// Prior parameters broadcast over `n` rows.
    ///
    /// For `Uniform` these are N(0, 1) parameters in the shape of its Gaussian
    /// posterior. [`Distribution::logli_prior`] scores a uniform code under the
    /// U(-1, 1) density instead, so the two disagree for `Uniform` only.
    pub fn prior_dist_info(&self, n: usize) -> DistInfo {
        let dim = self.dim();
        let filled = |v: f32| Tensor::from_vec(vec![v; n * dim], false);
        match self {
            Distribution::Categorical { .. } => {
                DistInfo::new().with("prob", filled(1.0 / dim.max(1) as f32))
            }
            Distribution::Uniform { .. } | Distribution::Gaussian { .. } => {
                DistInfo::new().with("mean", filled(0.0)).with("stddev", filled(1.0))
            }
            Distribution::MeanBernoulli { .. } => DistInfo::new().with("p", filled(0.5)),
        }
    }

    /// Turn `n` rows of raw network output into distribution parameters
    pub fn activate_dist(&self, flat: &Tensor, n: usize) -> Result<DistInfo> {
        let flat_dim = self.dist_flat_dim();
        check_len(flat, n * flat_dim)?;
        let info = match *self {
            Distribution::Categorical { dim } => {
                DistInfo::new().with("prob", softmax_rows(flat, n, dim))
            }
            Distribution::Uniform { dim, fix_std } | Distribution::Gaussian { dim, fix_std } => {
                let mean = slice_cols(flat, n, flat_dim, 0, dim);
                let stddev = if fix_std {
                    Tensor::from_vec(vec![1.0; n * dim], false)
                } else {
                    // the head predicts log-variance
                    sqrt(&exp(&slice_cols(flat, n, flat_dim, dim, 2 * dim)))
                };
                DistInfo::new().with("mean", mean).with("stddev", stddev)
            }
            Distribution::MeanBernoulli { .. } => DistInfo::new().with("p", sigmoid(flat)),
        };
        Ok(info)
    }

    /// Per-row log-likelihood of `x` under `info`
    pub fn logli(&self, x: &Tensor, info: &DistInfo, n: usize) -> Result<Tensor> {
        let dim = self.dim();
        check_len(x, n * dim)?;
        let per_elem = match self {
            Distribution::Categorical { .. } => {
                let prob = info.require("prob")?;
                mul(x, &ln(&add_scalar(prob, TINY)))
            }
            Distribution::Uniform { .. } | Distribution::Gaussian { .. } => {
                let mean = info.require("mean")?;
                let stddev = add_scalar(info.require("stddev")?, TINY);
                let epsilon = div(&sub(x, mean), &stddev);
                let quad = add_scalar(&scale(&square(&epsilon), -0.5), -HALF_LN_2PI);
                sub(&quad, &ln(&stddev))
            }
            Distribution::MeanBernoulli { .. } => {
                let p = info.require("p")?;
                let on = mul(x, &ln(&add_scalar(p, TINY)));
                let off = mul(&one_minus(x), &ln(&add_scalar(&one_minus(p), TINY)));
                add(&on, &off)
            }
        };
        Ok(sum_rows(&per_elem, n, dim))
    }

    /// Per-row log-likelihood of `x` under the prior
    pub fn logli_prior(&self, x: &Tensor, n: usize) -> Result<Tensor> {
        match self {
            Distribution::Uniform { dim, .. } => {
                check_len(x, n * dim)?;
                let density = -(*dim as f32) * std::f32::consts::LN_2;
                Ok(Tensor::from_vec(vec![density; n], false))
            }
            _ => self.logli(x, &self.prior_dist_info(n), n),
        }
    }
}

fn one_minus(t: &Tensor) -> Tensor {
    add_scalar(&scale(t, -1.0), 1.0)
}

pub(crate) fn check_len(t: &Tensor, expected: usize) -> Result<()> {
    if t.len() == expected {
        Ok(())
    } else {
        Err(Error::ShapeMismatch { expected, actual: t.len() })
    }
}
