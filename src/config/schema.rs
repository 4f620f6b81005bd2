//! YAML schema for declarative GAN training

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::gan::{ClipRange, OptimizerSpec, Variant};
use crate::model::RegularizedGanConfig;

/// Complete training config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanSpec {
    /// Naming and output directories
    #[serde(default)]
    pub experiment: ExperimentSpec,

    /// GAN variant; decides loss, schedule and default optimizers
    #[serde(default)]
    pub variant: Variant,

    /// Generator/discriminator network
    pub model: RegularizedGanConfig,

    /// Real-data source
    pub data: DataSpec,

    /// Training hyperparameters
    #[serde(default)]
    pub training: TrainingParams,

    /// Per-player optimizer overrides of the variant defaults
    #[serde(default)]
    pub optimizer: OptimizerOverrides,
}

/// Experiment naming and artifact locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSpec {
    /// Prefix of checkpoint files
    pub name: String,

    /// Summary stream directory
    pub log_dir: PathBuf,

    /// Model definition and checkpoint directory
    pub checkpoint_dir: PathBuf,
}

impl Default for ExperimentSpec {
    fn default() -> Self {
        Self {
            name: "experiment".to_string(),
            log_dir: PathBuf::from("logs"),
            checkpoint_dir: PathBuf::from("ckt"),
        }
    }
}

/// Where real batches come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSpec {
    /// Ring of 2-D Gaussians
    GaussianMixture {
        #[serde(default = "default_modes")]
        modes: usize,
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default = "default_std")]
        std: f32,
    },
    /// Rows stored as a JSON array of arrays
    JsonFile { path: PathBuf },
}

impl DataSpec {
    /// Row width, when it is known without touching the disk
    pub fn known_dim(&self) -> Option<usize> {
        match self {
            DataSpec::GaussianMixture { .. } => Some(2),
            DataSpec::JsonFile { .. } => None,
        }
    }
}

fn default_modes() -> usize {
    8
}

fn default_radius() -> f32 {
    2.0
}

fn default_std() -> f32 {
    0.02
}

/// Training hyperparameters; missing fields take the trainer defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub batch_size: usize,
    pub max_epoch: usize,
    pub updates_per_epoch: usize,

    /// Save a checkpoint every N global steps
    pub snapshot_interval: usize,

    pub info_reg_coeff: f32,
    pub gen_disc_update_ratio: usize,
    pub n_critic: usize,
    pub weight_clip: ClipRange,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_grad_clip: Option<ClipRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator_grad_clip: Option<ClipRange>,

    /// Seeds data shuffling and latent sampling
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            batch_size: 64,
            max_epoch: 100,
            updates_per_epoch: 100,
            snapshot_interval: 500,
            info_reg_coeff: 1.0,
            gen_disc_update_ratio: 1,
            n_critic: 5,
            weight_clip: ClipRange(-0.01, 0.01),
            generator_grad_clip: None,
            discriminator_grad_clip: None,
            seed: 0,
        }
    }
}

/// Optimizer overrides; `None` keeps the variant default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizerOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<OptimizerSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<OptimizerSpec>,
}
