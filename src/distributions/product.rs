//! Concatenation of independent distributions

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::info::DistInfo;
use super::leaf::{check_len, Distribution};
use crate::autograd::{add, concat_cols, slice_cols, Tensor};
use crate::Result;

/// Independent components laid side by side along the column axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub dists: Vec<Distribution>,
}

impl Product {
    pub fn new(dists: Vec<Distribution>) -> Self {
        Self { dists }
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dists.iter().map(Distribution::dim).sum()
    }

    pub fn dist_flat_dim(&self) -> usize {
        self.dists.iter().map(Distribution::dist_flat_dim).sum()
    }

    /// Split a `n x dim` batch into one tensor per component
    pub fn split_var(&self, x: &Tensor, n: usize) -> Result<Vec<Tensor>> {
        let widths: Vec<usize> = self.dists.iter().map(Distribution::dim).collect();
        split_columns(x, n, &widths)
    }

    /// Split a `n x dist_flat_dim` batch of raw parameters per component
    pub fn split_dist_flat(&self, flat: &Tensor, n: usize) -> Result<Vec<Tensor>> {
        let widths: Vec<usize> = self.dists.iter().map(Distribution::dist_flat_dim).collect();
        split_columns(flat, n, &widths)
    }

    /// Recover per-component infos from a joined info
    pub fn split_dist_info(&self, info: &DistInfo) -> Result<Vec<DistInfo>> {
        self.dists
            .iter()
            .enumerate()
            .map(|(i, dist)| {
                let mut part = DistInfo::new();
                for key in dist.info_keys() {
                    part.insert(*key, info.require(&format!("id_{i}_{key}"))?.clone());
                }
                Ok(part)
            })
            .collect()
    }

    /// Join per-component infos under `id_{i}_` prefixes
    pub fn join_dist_infos(&self, infos: &[DistInfo]) -> DistInfo {
        let mut joined = DistInfo::new();
        for (i, info) in infos.iter().enumerate() {
            for (key, value) in info.iter() {
                joined.insert(format!("id_{i}_{key}"), value.clone());
            }
        }
        joined
    }

    /// Draw `n` rows from every component's prior
    pub fn sample_prior<R: Rng>(&self, n: usize, rng: &mut R) -> Tensor {
        let parts: Vec<(Tensor, usize)> =
            self.dists.iter().map(|d| (d.sample_prior(n, rng), d.dim())).collect();
        concat_cols(&parts, n)
    }

    pub fn prior_dist_info(&self, n: usize) -> DistInfo {
        let infos: Vec<DistInfo> = self.dists.iter().map(|d| d.prior_dist_info(n)).collect();
        self.join_dist_infos(&infos)
    }

    pub fn activate_dist(&self, flat: &Tensor, n: usize) -> Result<DistInfo> {
        let infos = self
            .split_dist_flat(flat, n)?
            .iter()
            .zip(&self.dists)
            .map(|(part, dist)| dist.activate_dist(part, n))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.join_dist_infos(&infos))
    }

    /// Sum of component log-likelihoods; zeros when there are no components
    pub fn logli(&self, x: &Tensor, info: &DistInfo, n: usize) -> Result<Tensor> {
        let xs = self.split_var(x, n)?;
        let infos = self.split_dist_info(info)?;
        let mut total = Tensor::zeros(n, false);
        for ((dist, xi), info_i) in self.dists.iter().zip(&xs).zip(&infos) {
            total = add(&total, &dist.logli(xi, info_i, n)?);
        }
        Ok(total)
    }

    pub fn logli_prior(&self, x: &Tensor, n: usize) -> Result<Tensor> {
        let xs = self.split_var(x, n)?;
        let mut total = Tensor::zeros(n, false);
        for (dist, xi) in self.dists.iter().zip(&xs) {
            total = add(&total, &dist.logli_prior(xi, n)?);
        }
        Ok(total)
    }
}

fn split_columns(x: &Tensor, n: usize, widths: &[usize]) -> Result<Vec<Tensor>> {
    let total: usize = widths.iter().sum();
    check_len(x, n * total)?;
    let mut start = 0;
    Ok(widths
        .iter()
        .map(|&w| {
            let part = slice_cols(x, n, total, start, start + w);
            start += w;
            part
        })
        .collect())
}
