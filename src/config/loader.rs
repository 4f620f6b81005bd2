//! Loading a [`GanSpec`] and turning it into trainer inputs

use std::fs;
use std::path::Path;

use super::schema::{DataSpec, GanSpec};
use super::validate::validate_config;
use crate::data::{Dataset, GaussianMixture, InMemoryDataset};
use crate::gan::{GanTrainer, TrainerConfig, TrainingResult, Variant};
use crate::logging::{log, LogLevel};
use crate::model::{RegularizedGan, RegularizedGanConfig, ScoreActivation};
use crate::{Error, Result};

/// Load and validate a YAML training config
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<GanSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let spec: GanSpec = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))?;

    validate_config(&spec).map_err(|e| Error::Config(format!("Invalid config: {e}")))?;

    Ok(spec)
}

/// Command-line overrides of the YAML values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainOverrides {
    pub epochs: Option<usize>,
    pub batch_size: Option<usize>,
    pub snapshot_interval: Option<usize>,
    pub seed: Option<u64>,
}

/// Apply overrides and re-validate
pub fn apply_overrides(spec: &mut GanSpec, overrides: TrainOverrides) -> Result<()> {
    if let Some(epochs) = overrides.epochs {
        spec.training.max_epoch = epochs;
    }
    if let Some(batch_size) = overrides.batch_size {
        spec.training.batch_size = batch_size;
    }
    if let Some(interval) = overrides.snapshot_interval {
        spec.training.snapshot_interval = interval;
    }
    if let Some(seed) = overrides.seed {
        spec.training.seed = seed;
    }
    validate_config(spec).map_err(|e| Error::Config(format!("Invalid config: {e}")))
}

impl GanSpec {
    /// Trainer settings: variant defaults overlaid with the YAML values
    pub fn trainer_config(&self, log_level: LogLevel) -> TrainerConfig {
        let defaults = TrainerConfig::for_variant(self.variant);
        let training = &self.training;
        TrainerConfig {
            variant: self.variant,
            batch_size: training.batch_size,
            exp_name: self.experiment.name.clone(),
            log_dir: self.experiment.log_dir.clone(),
            checkpoint_dir: self.experiment.checkpoint_dir.clone(),
            max_epoch: training.max_epoch,
            updates_per_epoch: training.updates_per_epoch,
            snapshot_interval: training.snapshot_interval,
            info_reg_coeff: training.info_reg_coeff,
            gen_disc_update_ratio: training.gen_disc_update_ratio,
            n_critic: training.n_critic,
            weight_clip: training.weight_clip,
            generator_grad_clip: training.generator_grad_clip,
            discrim_grad_clip: training.discriminator_grad_clip,
            discrim_optimizer: self.optimizer.discriminator.clone().unwrap_or(defaults.discrim_optimizer),
            generator_optimizer: self.optimizer.generator.clone().unwrap_or(defaults.generator_optimizer),
            seed: training.seed,
            log_level,
        }
    }

    /// Model settings; the critic of a Wasserstein run always scores linearly
    pub fn model_config(&self) -> RegularizedGanConfig {
        let mut config = self.model.clone();
        if self.variant == Variant::Wasserstein {
            config.score_activation = ScoreActivation::Linear;
        }
        config
    }

    /// Open the configured data source, seeded from the training seed
    pub fn build_dataset(&self) -> Result<Box<dyn Dataset>> {
        let seed = self.training.seed;
        let dataset: Box<dyn Dataset> = match &self.data {
            DataSpec::GaussianMixture { modes, radius, std } => {
                Box::new(GaussianMixture::new(*modes, *radius, *std, seed)?)
            }
            DataSpec::JsonFile { path } => Box::new(InMemoryDataset::from_json_file(path, seed)?),
        };
        Ok(dataset)
    }

    /// Model, data and settings ready to train
    pub fn build_trainer(
        &self,
        log_level: LogLevel,
    ) -> Result<GanTrainer<RegularizedGan, Box<dyn Dataset>>> {
        let model = RegularizedGan::new(self.model_config())?;
        let dataset = self.build_dataset()?;
        GanTrainer::new(model, dataset, self.trainer_config(log_level))
    }
}

/// Train from a YAML file
///
/// ```no_run
/// use adversario::config::{train_from_yaml, TrainOverrides};
/// use adversario::logging::LogLevel;
///
/// let result = train_from_yaml("gan.yaml", TrainOverrides::default(), LogLevel::Normal)?;
/// println!("{} global steps", result.global_step);
/// # Ok::<(), adversario::Error>(())
/// ```
pub fn train_from_yaml<P: AsRef<Path>>(
    config_path: P,
    overrides: TrainOverrides,
    log_level: LogLevel,
) -> Result<TrainingResult> {
    let mut spec = load_config(config_path)?;
    apply_overrides(&mut spec, overrides)?;

    log(log_level, LogLevel::Normal, "Config loaded and validated");
    log(log_level, LogLevel::Normal, &format!("  Variant: {}", spec.variant));
    log(log_level, LogLevel::Normal, &format!("  Batch size: {}", spec.training.batch_size));
    log(log_level, LogLevel::Normal, &format!("  Epochs: {}", spec.training.max_epoch));

    let mut trainer = spec.build_trainer(log_level)?;
    trainer.train()
}
