//! Epoch loop driving a [`GanModel`] through a variant's update schedule
//!
//! ```no_run
//! use adversario::data::GaussianMixture;
//! use adversario::gan::{GanTrainer, TrainerConfig, Variant};
//! use adversario::model::{RegularizedGan, RegularizedGanConfig};
//!
//! let model = RegularizedGan::new(RegularizedGanConfig::default()).unwrap();
//! let data = GaussianMixture::new(8, 2.0, 0.05, 0).unwrap();
//! let config = TrainerConfig::for_variant(Variant::InfoGan);
//! let mut trainer = GanTrainer::new(model, data, config).unwrap();
//! let result = trainer.train().unwrap();
//! println!("{} steps", result.global_step);
//! ```

mod result;
mod session;

#[cfg(test)]
mod tests;

pub use result::TrainingResult;

use std::time::Instant;

use super::checkpoint::{save_model_definition, CheckpointSaver};
use super::config::TrainerConfig;
use super::graph::{build_training_graph, ForwardPass};
use super::log::LogRecord;
use super::summary::{ImageSummary, SummaryWriter};
use crate::data::Dataset;
use crate::logging::{log, warn, LogLevel};
use crate::model::GanModel;
use crate::{Error, Result};
use session::Session;

/// Number of generated samples in the per-epoch image summary
const SUMMARY_IMAGES: usize = 16;

/// Lifecycle of a trainer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    Uninitialized,
    GraphBuilt,
    Running,
    Completed,
    /// Stopped by a divergence or another fatal error
    Aborted,
}

/// Owns the model and the data source for one training run
pub struct GanTrainer<M, D> {
    model: M,
    dataset: D,
    config: TrainerConfig,
    state: TrainerState,
    global_step: usize,
}

impl<M: GanModel, D: Dataset> GanTrainer<M, D> {
    pub fn new(model: M, dataset: D, config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        if dataset.dim() != model.output_dim() {
            return Err(Error::ShapeMismatch { expected: model.output_dim(), actual: dataset.dim() });
        }
        Ok(Self { model, dataset, config, state: TrainerState::Uninitialized, global_step: 0 })
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// Inner iterations completed so far
    pub fn global_step(&self) -> usize {
        self.global_step
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Run every epoch. A NaN epoch mean ends the run with
    /// [`Error::Divergence`] after the epoch line is printed.
    pub fn train(&mut self) -> Result<TrainingResult> {
        let outcome = self.run();
        self.state = match outcome {
            Ok(_) => TrainerState::Completed,
            Err(_) => TrainerState::Aborted,
        };
        outcome
    }

    fn run(&mut self) -> Result<TrainingResult> {
        let started = Instant::now();
        let level = self.config.log_level;
        let mut result = TrainingResult::default();

        // fail before any compute is spent if the model cannot be described
        result.model_definition = save_model_definition(&self.model, &self.config.checkpoint_dir)?;

        let graph = build_training_graph(&self.model, &self.config)?;
        self.state = TrainerState::GraphBuilt;
        log(
            level,
            LogLevel::Verbose,
            &format!("{} graph: {}", graph.variant(), graph.log_keys().join(", ")),
        );

        let params = self.model.parameters();
        let saver = CheckpointSaver::new(
            &self.config.checkpoint_dir,
            &self.config.exp_name,
            self.config.snapshot_interval,
        );
        let mut summary = match SummaryWriter::open(&self.config.log_dir) {
            Ok(writer) => Some(writer),
            Err(e) => {
                warn(&format!("{e}; continuing without summaries"));
                result.summary_failures += 1;
                None
            }
        };
        let mut session = Session::new(&self.model, &mut self.dataset, &graph, &self.config);
        let mut record = LogRecord::new(graph.log_keys().to_vec());
        self.state = TrainerState::Running;

        for epoch in 0..self.config.max_epoch {
            for i in 0..self.config.updates_per_epoch {
                graph.policy().run_iteration(i, &mut session, &mut record)?;
                self.global_step += 1;

                if saver.is_due(self.global_step) {
                    match saver.save(self.global_step, &params) {
                        Ok(path) => {
                            log(level, LogLevel::Normal, &format!("Model saved in file: {}", path.display()));
                            result.checkpoints.push(path);
                        }
                        Err(e) => {
                            warn(&format!("checkpoint at step {} failed: {e}", self.global_step));
                            result.checkpoint_failures += 1;
                        }
                    }
                }
            }

            let pass = session.summary_pass()?;
            if let Some(writer) = summary.as_mut() {
                let image_shape = self.model.image_shape();
                if let Err(e) = write_summary(writer, self.global_step, graph.log_keys(), &pass, image_shape) {
                    warn(&format!("summary at step {} failed: {e}", self.global_step));
                    result.summary_failures += 1;
                }
            }

            let epoch_log = record.finish_epoch(epoch);
            log(level, LogLevel::Normal, &epoch_log.line());
            if let Some(metric) = epoch_log.first_nan() {
                return Err(Error::Divergence { epoch, metric: metric.to_string() });
            }
            result.epochs.push(epoch_log);
        }

        let (d_steps, g_steps) = session.step_counts();
        result.discriminator_steps = d_steps;
        result.generator_steps = g_steps;
        result.global_step = self.global_step;
        result.elapsed_secs = started.elapsed().as_secs_f64();
        Ok(result)
    }
}

fn write_summary(
    writer: &mut SummaryWriter,
    step: usize,
    keys: &[String],
    pass: &ForwardPass,
    image_shape: Option<(usize, usize)>,
) -> Result<()> {
    writer.write_scalars(step, keys.iter().map(String::as_str).zip(pass.log_values.iter().copied()))?;
    if let Some((height, width)) = image_shape {
        let pixels = pass.fake.sample.to_vec();
        let count = (pixels.len() / (height * width).max(1)).min(SUMMARY_IMAGES);
        let image = ImageSummary {
            height,
            width,
            count,
            pixels: pixels[..count * height * width].to_vec(),
        };
        writer.write_image(step, "train_samples", image)?;
    }
    Ok(())
}
