//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{DataSpec, GanSpec};
use crate::gan::{ClipRange, OptimizerSpec};

/// Validate a training config
///
/// Checks:
/// - Data paths exist
/// - Counts and rates are in valid ranges
/// - Clip ranges are ordered
/// - The model generates rows as wide as the data
pub fn validate_config(spec: &GanSpec) -> Result<(), ValidationError> {
    if spec.experiment.name.trim().is_empty() {
        return Err(ValidationError::EmptyExperimentName);
    }

    #[cfg(not(test))]
    if let DataSpec::JsonFile { path } = &spec.data {
        if !path.exists() {
            return Err(ValidationError::TrainDataNotFound(path.display().to_string()));
        }
    }

    let training = &spec.training;
    if training.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(training.batch_size));
    }
    if training.max_epoch == 0 {
        return Err(ValidationError::InvalidEpochs(training.max_epoch));
    }
    if training.updates_per_epoch == 0 {
        return Err(ValidationError::InvalidUpdatesPerEpoch(training.updates_per_epoch));
    }
    if training.snapshot_interval == 0 {
        return Err(ValidationError::InvalidSnapshotInterval(training.snapshot_interval));
    }
    if training.gen_disc_update_ratio == 0 {
        return Err(ValidationError::InvalidUpdateRatio(training.gen_disc_update_ratio));
    }
    if training.n_critic == 0 {
        return Err(ValidationError::InvalidCriticSteps(training.n_critic));
    }
    if !training.info_reg_coeff.is_finite() || training.info_reg_coeff < 0.0 {
        return Err(ValidationError::InvalidInfoCoeff(training.info_reg_coeff));
    }

    check_range("weight_clip", training.weight_clip)?;
    if let Some(clip) = training.generator_grad_clip {
        check_range("generator_grad_clip", clip)?;
    }
    if let Some(clip) = training.discriminator_grad_clip {
        check_range("discriminator_grad_clip", clip)?;
    }

    if let Some(opt) = &spec.optimizer.discriminator {
        check_optimizer("discriminator", opt)?;
    }
    if let Some(opt) = &spec.optimizer.generator {
        check_optimizer("generator", opt)?;
    }

    if spec.model.latent_spec.is_empty() {
        return Err(ValidationError::EmptyLatentSpec);
    }
    if spec.model.output_dim == 0 {
        return Err(ValidationError::InvalidOutputDim(spec.model.output_dim));
    }
    if let Some(data) = spec.data.known_dim() {
        if data != spec.model.output_dim {
            return Err(ValidationError::DataDimMismatch { data, model: spec.model.output_dim });
        }
    }

    if let DataSpec::GaussianMixture { modes, radius, std } = spec.data {
        if modes == 0 {
            return Err(ValidationError::InvalidMixture("modes must be > 0".into()));
        }
        if !radius.is_finite() || !std.is_finite() || std < 0.0 {
            return Err(ValidationError::InvalidMixture(format!(
                "radius {radius} and std {std} must be finite, std >= 0"
            )));
        }
    }

    Ok(())
}

fn check_range(name: &'static str, range: ClipRange) -> Result<(), ValidationError> {
    if range.validate().is_err() {
        return Err(ValidationError::InvalidClipRange { name, lo: range.lo(), hi: range.hi() });
    }
    Ok(())
}

fn check_optimizer(player: &'static str, opt: &OptimizerSpec) -> Result<(), ValidationError> {
    if opt.lr.is_nan() || opt.lr <= 0.0 || opt.lr > 1.0 {
        return Err(ValidationError::InvalidLearningRate { player, lr: opt.lr });
    }
    if let Some(beta1) = opt.beta1 {
        if !(0.0..1.0).contains(&beta1) {
            return Err(ValidationError::InvalidBeta1 { player, beta1 });
        }
    }
    Ok(())
}
