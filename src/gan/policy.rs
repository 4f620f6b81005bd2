//! Inner-iteration schedules of discriminator and generator steps

use crate::autograd::Tensor;
use crate::data::Batch;
use crate::optim::clamp_weights;
use crate::Result;

use super::config::{ClipRange, TrainerConfig, Variant};
use super::log::LogRecord;

/// What an update policy drives during one iteration
pub trait StepContext {
    /// Draw a fresh real batch
    fn next_batch(&mut self) -> Result<Batch>;

    /// One discriminator update; returns the metric row for the log
    fn discriminator_step(&mut self, batch: &Batch) -> Result<Vec<f32>>;

    /// One generator update
    fn generator_step(&mut self, batch: &Batch) -> Result<()>;
}

/// Element-wise clamp of discriminator weights, built once during setup
#[derive(Debug, Clone)]
pub struct WeightClamp {
    variables: Vec<Tensor>,
    range: ClipRange,
}

impl WeightClamp {
    pub fn new(variables: Vec<Tensor>, range: ClipRange) -> Self {
        Self { variables, range }
    }

    pub fn apply(&self) {
        clamp_weights(&self.variables, self.range.lo(), self.range.hi());
    }

    pub fn range(&self) -> ClipRange {
        self.range
    }
}

/// How many steps of each player one iteration performs
#[derive(Debug, Clone)]
pub enum UpdatePolicy {
    /// One batch; a generator step every iteration, a logged
    /// discriminator step every `ratio`-th iteration
    Alternating { ratio: usize },
    /// `n_critic` logged discriminator steps on fresh batches, each followed
    /// by the weight clamp, then one unlogged generator step
    Critic { n_critic: usize, clamp: WeightClamp },
}

impl UpdatePolicy {
    /// Policy for the configured variant; `discriminator_vars` feed the clamp
    pub fn for_config(config: &TrainerConfig, discriminator_vars: &[Tensor]) -> Self {
        match config.variant {
            Variant::Standard | Variant::InfoGan => {
                UpdatePolicy::Alternating { ratio: config.gen_disc_update_ratio }
            }
            Variant::Wasserstein => UpdatePolicy::Critic {
                n_critic: config.n_critic,
                clamp: WeightClamp::new(discriminator_vars.to_vec(), config.weight_clip),
            },
        }
    }

    /// Run inner iteration `i` of the current epoch
    pub fn run_iteration(
        &self,
        i: usize,
        ctx: &mut impl StepContext,
        log: &mut LogRecord,
    ) -> Result<()> {
        match self {
            UpdatePolicy::Alternating { ratio } => {
                let batch = ctx.next_batch()?;
                ctx.generator_step(&batch)?;
                if i % ratio == 0 {
                    let values = ctx.discriminator_step(&batch)?;
                    log.push(values)?;
                }
            }
            UpdatePolicy::Critic { n_critic, clamp } => {
                for _ in 0..*n_critic {
                    let batch = ctx.next_batch()?;
                    let values = ctx.discriminator_step(&batch)?;
                    clamp.apply();
                    log.push(values)?;
                }
                let batch = ctx.next_batch()?;
                ctx.generator_step(&batch)?;
            }
        }
        Ok(())
    }
}
