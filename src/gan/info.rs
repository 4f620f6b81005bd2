//! Mutual-information bonus between latent codes and generated samples

use crate::autograd::{add, add_scaled, mean, scale, sub, Tensor};
use crate::distributions::{DistInfo, Product};
use crate::model::LatentLayout;
use crate::Result;

/// Estimate for one code partition
#[derive(Debug, Clone)]
struct PartitionEstimate {
    mi: Tensor,
    cross_ent: Tensor,
}

/// Result of evaluating the regularizer on one forward pass
#[derive(Debug, Clone)]
pub struct InfoEstimate {
    /// Sum of the per-partition MI estimates
    pub mi: Tensor,
    /// Sum of the per-partition cross-entropies
    pub cross_ent: Tensor,
    /// Values in [`InfoRegularizer::log_keys`] order
    pub log_values: Vec<f32>,
    adjusts: bool,
}

impl InfoEstimate {
    /// `loss - coeff * mi`, or `loss` untouched when no code is regularized
    pub fn regularize(&self, loss: &Tensor, coeff: f32) -> Tensor {
        if self.adjusts {
            add_scaled(loss, &self.mi, -coeff)
        } else {
            loss.clone()
        }
    }
}

/// InfoGAN regularization over the discrete and continuous code partitions.
///
/// For each non-empty partition `c`, with `q(c|x)` the discriminator's
/// posterior on generated data and `q(c)` the prior:
/// `CrossEnt = -mean(log q(c|x))`, `Ent = -mean(log q(c))`,
/// `MI = Ent - CrossEnt`.
#[derive(Debug, Clone)]
pub struct InfoRegularizer {
    coeff: f32,
    has_disc: bool,
    has_cont: bool,
    /// Regularized components whose posterior carries a `stddev`
    std_components: Vec<usize>,
}

impl InfoRegularizer {
    pub fn new(layout: &LatentLayout, coeff: f32) -> Self {
        let std_components = layout
            .reg_latent_dist()
            .dists
            .iter()
            .enumerate()
            .filter(|(_, d)| d.info_keys().contains(&"stddev"))
            .map(|(i, _)| i)
            .collect();
        Self {
            coeff,
            has_disc: !layout.reg_disc_latent_dist().is_empty(),
            has_cont: !layout.reg_cont_latent_dist().is_empty(),
            std_components,
        }
    }

    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Metric names appended after the adversarial ones
    pub fn log_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if self.has_disc {
            keys.extend(["MI_disc".to_string(), "CrossEnt_disc".to_string()]);
        }
        if self.has_cont {
            keys.extend(["MI_cont".to_string(), "CrossEnt_cont".to_string()]);
        }
        for idx in &self.std_components {
            keys.push(format!("max_std_{idx}"));
            keys.push(format!("min_std_{idx}"));
        }
        keys.extend(["MI".to_string(), "CrossEnt".to_string()]);
        keys
    }

    /// Evaluate on the latent batch `z` that produced the generated data and
    /// the discriminator's posterior for that data.
    pub fn evaluate(
        &self,
        layout: &LatentLayout,
        z: &Tensor,
        reg_dist_info: &DistInfo,
        n: usize,
    ) -> Result<InfoEstimate> {
        let mut mi = Tensor::scalar(0.0, false);
        let mut cross_ent = Tensor::scalar(0.0, false);
        let mut log_values = Vec::new();

        let reg_z = if self.has_disc || self.has_cont {
            Some(layout.reg_z(z, n)?)
        } else {
            None
        };

        if let (true, Some(reg_z)) = (self.has_disc, &reg_z) {
            let codes = layout.disc_reg_z(reg_z, n)?;
            let info = layout.disc_reg_dist_info(reg_dist_info)?;
            let est = estimate(layout.reg_disc_latent_dist(), &codes, &info, n)?;
            log_values.extend([est.mi.item(), est.cross_ent.item()]);
            mi = add(&mi, &est.mi);
            cross_ent = add(&cross_ent, &est.cross_ent);
        }

        if let (true, Some(reg_z)) = (self.has_cont, &reg_z) {
            let codes = layout.cont_reg_z(reg_z, n)?;
            let info = layout.cont_reg_dist_info(reg_dist_info)?;
            let est = estimate(layout.reg_cont_latent_dist(), &codes, &info, n)?;
            log_values.extend([est.mi.item(), est.cross_ent.item()]);
            mi = add(&mi, &est.mi);
            cross_ent = add(&cross_ent, &est.cross_ent);
        }

        if !self.std_components.is_empty() {
            let parts = layout.reg_latent_dist().split_dist_info(reg_dist_info)?;
            for &idx in &self.std_components {
                let stddev = parts.get(idx).and_then(|info| info.get("stddev"));
                match stddev {
                    Some(s) => log_values.extend([s.max(), s.min()]),
                    None => log_values.extend([f32::NAN, f32::NAN]),
                }
            }
        }

        log_values.extend([mi.item(), cross_ent.item()]);
        Ok(InfoEstimate { mi, cross_ent, log_values, adjusts: self.has_disc || self.has_cont })
    }
}

fn estimate(dist: &Product, codes: &Tensor, info: &DistInfo, n: usize) -> Result<PartitionEstimate> {
    let log_q_c_given_x = dist.logli(codes, info, n)?;
    let log_q_c = dist.logli_prior(codes, n)?;
    let cross_ent = scale(&mean(&log_q_c_given_x), -1.0);
    let ent = scale(&mean(&log_q_c), -1.0);
    Ok(PartitionEstimate { mi: sub(&ent, &cross_ent), cross_ent })
}
