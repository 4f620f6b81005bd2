//! Numeric training state of one run

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::autograd::Tensor;
use crate::data::{Batch, Dataset};
use crate::gan::config::TrainerConfig;
use crate::gan::graph::{ForwardPass, TrainingGraph};
use crate::gan::policy::StepContext;
use crate::gan::step::{build_step, TrainStep};
use crate::logging::{log, LogLevel};
use crate::model::GanModel;
use crate::Result;

/// Optimizer state, latent sampler and data source bound to a graph
pub(crate) struct Session<'a, M: ?Sized, D: ?Sized> {
    model: &'a M,
    dataset: &'a mut D,
    graph: &'a TrainingGraph,
    d_step: TrainStep,
    g_step: TrainStep,
    rng: StdRng,
    batch_size: usize,
    level: LogLevel,
}

impl<'a, M: GanModel + ?Sized, D: Dataset + ?Sized> Session<'a, M, D> {
    pub(crate) fn new(
        model: &'a M,
        dataset: &'a mut D,
        graph: &'a TrainingGraph,
        config: &TrainerConfig,
    ) -> Self {
        let partition = graph.partition();
        let d_step = build_step(
            config.discrim_optimizer.build(),
            partition.discriminator.clone(),
            config.discrim_grad_clip,
        );
        let g_step = build_step(
            config.generator_optimizer.build(),
            partition.generator.clone(),
            config.generator_grad_clip,
        );
        Self {
            model,
            dataset,
            graph,
            d_step,
            g_step,
            rng: StdRng::seed_from_u64(config.seed),
            batch_size: config.batch_size,
            level: config.log_level,
        }
    }

    fn sample_latent(&mut self, n: usize) -> Tensor {
        self.model.latent().latent_dist().sample_prior(n, &mut self.rng)
    }

    fn forward(&mut self, batch: &Batch) -> Result<ForwardPass> {
        let z = self.sample_latent(batch.rows);
        self.graph.forward(self.model, &z, batch)
    }

    /// Forward pass on a fresh batch without updating anything
    pub(crate) fn summary_pass(&mut self) -> Result<ForwardPass> {
        let batch = self.next_batch()?;
        self.forward(&batch)
    }

    /// (discriminator, generator) steps executed so far
    pub(crate) fn step_counts(&self) -> (usize, usize) {
        (self.d_step.executions(), self.g_step.executions())
    }
}

impl<M: GanModel + ?Sized, D: Dataset + ?Sized> StepContext for Session<'_, M, D> {
    fn next_batch(&mut self) -> Result<Batch> {
        self.dataset.next_batch(self.batch_size)
    }

    fn discriminator_step(&mut self, batch: &Batch) -> Result<Vec<f32>> {
        let pass = self.forward(batch)?;
        let loss = self.d_step.execute(&[pass.discriminator_loss]);
        log(
            self.level,
            LogLevel::Verbose,
            &format!("  d step {}: loss {loss:.6}", self.d_step.executions()),
        );
        Ok(pass.log_values)
    }

    fn generator_step(&mut self, batch: &Batch) -> Result<()> {
        let pass = self.forward(batch)?;
        let loss = self.g_step.execute(&[pass.generator_loss]);
        log(
            self.level,
            LogLevel::Verbose,
            &format!("  g step {}: loss {loss:.6}", self.g_step.executions()),
        );
        Ok(())
    }
}
