//! Immutable training setup and the per-step forward pass

use crate::autograd::Tensor;
use crate::data::Batch;
use crate::model::{GanModel, Generated};
use crate::{Error, Result};

use super::config::{TrainerConfig, Variant};
use super::info::InfoRegularizer;
use super::loss::{loss_policy, LossPolicy};
use super::partition::VariablePartition;
use super::policy::UpdatePolicy;

/// Metric keys every variant logs, in order
pub const BASE_LOG_KEYS: [&str; 6] = [
    "max_real_d",
    "min_real_d",
    "max_fake_d",
    "min_fake_d",
    "discriminator_loss",
    "generator_loss",
];

/// Everything that stays fixed for a run: strategies, the variable split,
/// the weight clamp and the ordered metric keys.
pub struct TrainingGraph {
    variant: Variant,
    batch_size: usize,
    loss: Box<dyn LossPolicy>,
    policy: UpdatePolicy,
    info: Option<InfoRegularizer>,
    partition: VariablePartition,
    log_keys: Vec<String>,
}

/// Losses and metric row of one forward pass
pub struct ForwardPass {
    /// Discriminator objective including the MI bonus
    pub discriminator_loss: Tensor,
    /// Generator objective including the MI bonus
    pub generator_loss: Tensor,
    /// Values in [`TrainingGraph::log_keys`] order
    pub log_values: Vec<f32>,
    pub fake: Generated,
}

/// Build the graph for `model` under `config`
pub fn build_training_graph<M: GanModel + ?Sized>(
    model: &M,
    config: &TrainerConfig,
) -> Result<TrainingGraph> {
    config.validate()?;
    let partition = VariablePartition::from_parameters(model.parameters())?;
    let policy = UpdatePolicy::for_config(config, &partition.discriminator);
    let info = config
        .variant
        .is_regularized()
        .then(|| InfoRegularizer::new(model.latent(), config.info_reg_coeff));

    let mut log_keys: Vec<String> = BASE_LOG_KEYS.iter().map(|k| k.to_string()).collect();
    if let Some(info) = &info {
        log_keys.extend(info.log_keys());
    }

    Ok(TrainingGraph {
        variant: config.variant,
        batch_size: config.batch_size,
        loss: loss_policy(config.variant),
        policy,
        info,
        partition,
        log_keys,
    })
}

impl TrainingGraph {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn log_keys(&self) -> &[String] {
        &self.log_keys
    }

    pub fn policy(&self) -> &UpdatePolicy {
        &self.policy
    }

    pub fn partition(&self) -> &VariablePartition {
        &self.partition
    }

    pub fn loss_policy(&self) -> &dyn LossPolicy {
        self.loss.as_ref()
    }

    /// Generate from `z`, score real and generated data, and compose both
    /// losses. `z` must hold `real.rows` latent rows.
    pub fn forward<M: GanModel + ?Sized>(
        &self,
        model: &M,
        z: &Tensor,
        real: &Batch,
    ) -> Result<ForwardPass> {
        if real.rows != self.batch_size {
            return Err(Error::ShapeMismatch { expected: self.batch_size, actual: real.rows });
        }
        if real.cols != model.output_dim() {
            return Err(Error::ShapeMismatch { expected: model.output_dim(), actual: real.cols });
        }
        let n = real.rows;

        let fake = model.generate(z, n)?;
        let real_out = model.discriminate(&real.inputs, n)?;
        let fake_out = model.discriminate(&fake.sample, n)?;

        let d_loss = self.loss.discriminator_loss(&real_out.score, &fake_out.score);
        let g_loss = self.loss.generator_loss(&fake_out.score);

        let mut log_values = vec![
            real_out.score.max(),
            real_out.score.min(),
            fake_out.score.max(),
            fake_out.score.min(),
            d_loss.item(),
            g_loss.item(),
        ];

        let (discriminator_loss, generator_loss) = match &self.info {
            Some(info) => {
                let estimate = info.evaluate(model.latent(), z, &fake_out.reg_dist_info, n)?;
                log_values.extend(&estimate.log_values);
                (
                    estimate.regularize(&d_loss, info.coeff()),
                    estimate.regularize(&g_loss, info.coeff()),
                )
            }
            None => (d_loss, g_loss),
        };

        Ok(ForwardPass { discriminator_loss, generator_loss, log_values, fake })
    }
}
