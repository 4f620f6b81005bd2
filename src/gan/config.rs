//! Trainer settings and per-variant defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::optim::{Adam, Optimizer, RMSProp, SGD};
use crate::{Error, Result};

/// GAN variant, selecting the loss and update strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Standard,
    #[default]
    #[serde(rename = "infogan")]
    InfoGan,
    Wasserstein,
}

impl Variant {
    /// Default (discriminator, generator) optimizers
    pub fn default_optimizers(self) -> (OptimizerSpec, OptimizerSpec) {
        match self {
            Variant::Standard | Variant::InfoGan => {
                (OptimizerSpec::adam(2e-4, 0.5), OptimizerSpec::adam(1e-3, 0.5))
            }
            Variant::Wasserstein => (OptimizerSpec::rmsprop(5e-5), OptimizerSpec::rmsprop(5e-5)),
        }
    }

    /// Whether the mutual-information bonus is folded into the losses
    pub fn is_regularized(self) -> bool {
        self == Variant::InfoGan
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Standard => "standard",
            Variant::InfoGan => "infogan",
            Variant::Wasserstein => "wasserstein",
        };
        f.write_str(name)
    }
}

/// Optimizer family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Adam,
    #[serde(alias = "rms_prop")]
    Rmsprop,
    Sgd,
}

/// Serializable optimizer choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSpec {
    pub name: OptimizerKind,
    pub lr: f32,
    /// Adam first-moment decay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta1: Option<f32>,
    /// SGD momentum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<f32>,
}

impl OptimizerSpec {
    pub fn adam(lr: f32, beta1: f32) -> Self {
        Self { name: OptimizerKind::Adam, lr, beta1: Some(beta1), momentum: None }
    }

    pub fn rmsprop(lr: f32) -> Self {
        Self { name: OptimizerKind::Rmsprop, lr, beta1: None, momentum: None }
    }

    pub fn sgd(lr: f32, momentum: f32) -> Self {
        Self { name: OptimizerKind::Sgd, lr, beta1: None, momentum: Some(momentum) }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.lr > 0.0 && self.lr.is_finite()) {
            return Err(Error::Config(format!("learning rate must be > 0, got {}", self.lr)));
        }
        if let Some(beta1) = self.beta1 {
            if !(0.0..1.0).contains(&beta1) {
                return Err(Error::Config(format!("beta1 must be in [0, 1), got {beta1}")));
            }
        }
        Ok(())
    }

    /// Construct a fresh optimizer with empty state
    pub fn build(&self) -> Box<dyn Optimizer> {
        match self.name {
            OptimizerKind::Adam => {
                Box::new(Adam::new(self.lr, self.beta1.unwrap_or(0.9), 0.999, 1e-8))
            }
            OptimizerKind::Rmsprop => Box::new(RMSProp::default_params(self.lr)),
            OptimizerKind::Sgd => Box::new(SGD::new(self.lr, self.momentum.unwrap_or(0.0))),
        }
    }
}

/// Closed interval used for gradient and weight clipping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange(pub f32, pub f32);

impl ClipRange {
    pub fn new(lo: f32, hi: f32) -> Result<Self> {
        let range = Self(lo, hi);
        range.validate()?;
        Ok(range)
    }

    pub fn lo(&self) -> f32 {
        self.0
    }

    pub fn hi(&self) -> f32 {
        self.1
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.is_nan() || self.1.is_nan() || self.0 > self.1 {
            return Err(Error::Config(format!("invalid clip range [{}, {}]", self.0, self.1)));
        }
        Ok(())
    }
}

/// Everything the training loop needs besides the model and the data
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    pub variant: Variant,
    pub batch_size: usize,
    pub exp_name: String,
    pub log_dir: PathBuf,
    pub checkpoint_dir: PathBuf,
    pub max_epoch: usize,
    pub updates_per_epoch: usize,
    pub snapshot_interval: usize,
    pub info_reg_coeff: f32,
    /// The discriminator steps on every `ratio`-th iteration (standard, InfoGAN)
    pub gen_disc_update_ratio: usize,
    /// Critic steps per iteration (Wasserstein)
    pub n_critic: usize,
    /// Discriminator weight clamp after each critic step (Wasserstein)
    pub weight_clip: ClipRange,
    pub generator_grad_clip: Option<ClipRange>,
    pub discrim_grad_clip: Option<ClipRange>,
    pub discrim_optimizer: OptimizerSpec,
    pub generator_optimizer: OptimizerSpec,
    /// Seeds latent sampling
    pub seed: u64,
    pub log_level: LogLevel,
}

impl TrainerConfig {
    /// Defaults for a variant, including its optimizers
    pub fn for_variant(variant: Variant) -> Self {
        let (discrim_optimizer, generator_optimizer) = variant.default_optimizers();
        Self {
            variant,
            batch_size: 64,
            exp_name: "experiment".to_string(),
            log_dir: PathBuf::from("logs"),
            checkpoint_dir: PathBuf::from("ckt"),
            max_epoch: 100,
            updates_per_epoch: 100,
            snapshot_interval: 500,
            info_reg_coeff: 1.0,
            gen_disc_update_ratio: 1,
            n_critic: 5,
            weight_clip: ClipRange(-0.01, 0.01),
            generator_grad_clip: None,
            discrim_grad_clip: None,
            discrim_optimizer,
            generator_optimizer,
            seed: 0,
            log_level: LogLevel::Normal,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("batch_size", self.batch_size),
            ("updates_per_epoch", self.updates_per_epoch),
            ("snapshot_interval", self.snapshot_interval),
            ("gen_disc_update_ratio", self.gen_disc_update_ratio),
            ("n_critic", self.n_critic),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(Error::Config(format!("{name} must be > 0")));
        }
        if self.exp_name.is_empty() {
            return Err(Error::Config("exp_name must not be empty".into()));
        }
        if !self.info_reg_coeff.is_finite() {
            return Err(Error::Config(format!(
                "info_reg_coeff must be finite, got {}",
                self.info_reg_coeff
            )));
        }
        self.weight_clip.validate()?;
        for clip in [self.generator_grad_clip, self.discrim_grad_clip].iter().flatten() {
            clip.validate()?;
        }
        self.discrim_optimizer.validate()?;
        self.generator_optimizer.validate()?;
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.exp_name, "experiment");
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.checkpoint_dir, PathBuf::from("ckt"));
        assert_eq!(config.max_epoch, 100);
        assert_eq!(config.updates_per_epoch, 100);
        assert_eq!(config.snapshot_interval, 500);
        assert_eq!(config.n_critic, 5);
        assert_eq!(config.weight_clip, ClipRange(-0.01, 0.01));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variant_optimizers() {
        let (d, g) = Variant::InfoGan.default_optimizers();
        assert_eq!(d, OptimizerSpec::adam(2e-4, 0.5));
        assert_eq!(g, OptimizerSpec::adam(1e-3, 0.5));
        let (d, g) = Variant::Wasserstein.default_optimizers();
        assert_eq!(d.name, OptimizerKind::Rmsprop);
        assert_eq!(g.lr, 5e-5);
    }

    #[test]
    fn test_built_optimizer_names() {
        assert_eq!(OptimizerSpec::adam(1e-3, 0.5).build().name(), "adam");
        assert_eq!(OptimizerSpec::rmsprop(1e-3).build().name(), "rmsprop");
        assert_eq!(OptimizerSpec::sgd(1e-3, 0.9).build().name(), "sgd");
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let config = TrainerConfig { gen_disc_update_ratio: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(msg)) if msg.contains("ratio")));
    }

    #[test]
    fn test_inverted_clip_rejected() {
        assert!(ClipRange::new(0.1, -0.1).is_err());
        let config =
            TrainerConfig { discrim_grad_clip: Some(ClipRange(1.0, 0.0)), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_variant_serde_names() {
        let v: Variant = serde_yaml::from_str("infogan").unwrap();
        assert_eq!(v, Variant::InfoGan);
        assert_eq!(Variant::Wasserstein.to_string(), "wasserstein");
    }
}
