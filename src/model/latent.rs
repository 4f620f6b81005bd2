//! Views over the generator's latent input

use super::config::LatentSpec;
use crate::autograd::{concat_cols, Tensor};
use crate::distributions::{DistInfo, Product};
use crate::Result;

/// Splits the latent vector into noise and regularized codes, and the codes
/// into their discrete and continuous partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentLayout {
    specs: Vec<LatentSpec>,
    latent_dist: Product,
    reg_latent_dist: Product,
    reg_disc_latent_dist: Product,
    reg_cont_latent_dist: Product,
}

impl LatentLayout {
    pub fn new(specs: Vec<LatentSpec>) -> Self {
        let pick = |keep: &dyn Fn(&LatentSpec) -> bool| {
            Product::new(specs.iter().filter(|s| keep(s)).map(|s| s.dist.clone()).collect())
        };
        let latent_dist = pick(&|_| true);
        let reg_latent_dist = pick(&|s| s.regularized);
        let reg_disc_latent_dist = pick(&|s| s.regularized && s.dist.is_discrete());
        let reg_cont_latent_dist = pick(&|s| s.regularized && !s.dist.is_discrete());
        Self { specs, latent_dist, reg_latent_dist, reg_disc_latent_dist, reg_cont_latent_dist }
    }

    pub fn specs(&self) -> &[LatentSpec] {
        &self.specs
    }

    /// Prior over the whole generator input
    pub fn latent_dist(&self) -> &Product {
        &self.latent_dist
    }

    /// Prior over the regularized codes
    pub fn reg_latent_dist(&self) -> &Product {
        &self.reg_latent_dist
    }

    pub fn reg_disc_latent_dist(&self) -> &Product {
        &self.reg_disc_latent_dist
    }

    pub fn reg_cont_latent_dist(&self) -> &Product {
        &self.reg_cont_latent_dist
    }

    /// Regularized columns of a latent batch
    pub fn reg_z(&self, z: &Tensor, n: usize) -> Result<Tensor> {
        let parts = self.latent_dist.split_var(z, n)?;
        let picked: Vec<(Tensor, usize)> = parts
            .into_iter()
            .zip(&self.specs)
            .filter(|(_, spec)| spec.regularized)
            .map(|(part, spec)| (part, spec.dist.dim()))
            .collect();
        Ok(concat_cols(&picked, n))
    }

    /// Discrete columns of a regularized-code batch
    pub fn disc_reg_z(&self, reg_z: &Tensor, n: usize) -> Result<Tensor> {
        self.filter_reg_z(reg_z, n, true)
    }

    /// Continuous columns of a regularized-code batch
    pub fn cont_reg_z(&self, reg_z: &Tensor, n: usize) -> Result<Tensor> {
        self.filter_reg_z(reg_z, n, false)
    }

    /// Posterior parameters of the discrete codes
    pub fn disc_reg_dist_info(&self, reg_dist_info: &DistInfo) -> Result<DistInfo> {
        self.filter_reg_dist_info(reg_dist_info, true)
    }

    /// Posterior parameters of the continuous codes
    pub fn cont_reg_dist_info(&self, reg_dist_info: &DistInfo) -> Result<DistInfo> {
        self.filter_reg_dist_info(reg_dist_info, false)
    }

    fn filter_reg_z(&self, reg_z: &Tensor, n: usize, discrete: bool) -> Result<Tensor> {
        let parts = self.reg_latent_dist.split_var(reg_z, n)?;
        let picked: Vec<(Tensor, usize)> = parts
            .into_iter()
            .zip(&self.reg_latent_dist.dists)
            .filter(|(_, dist)| dist.is_discrete() == discrete)
            .map(|(part, dist)| (part, dist.dim()))
            .collect();
        Ok(concat_cols(&picked, n))
    }

    fn filter_reg_dist_info(&self, info: &DistInfo, discrete: bool) -> Result<DistInfo> {
        let infos: Vec<DistInfo> = self
            .reg_latent_dist
            .split_dist_info(info)?
            .into_iter()
            .zip(&self.reg_latent_dist.dists)
            .filter(|(_, dist)| dist.is_discrete() == discrete)
            .map(|(info, _)| info)
            .collect();
        let target = if discrete { &self.reg_disc_latent_dist } else { &self.reg_cont_latent_dist };
        Ok(target.join_dist_infos(&infos))
    }
}
