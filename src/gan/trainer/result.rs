//! Outcome of a completed run

use std::path::PathBuf;

use crate::gan::log::EpochLog;

/// Summary of a completed training run
#[derive(Debug, Clone, Default)]
pub struct TrainingResult {
    /// Epoch means in order
    pub epochs: Vec<EpochLog>,
    /// Inner iterations run across all epochs
    pub global_step: usize,
    pub discriminator_steps: usize,
    pub generator_steps: usize,
    /// Snapshots written successfully
    pub checkpoints: Vec<PathBuf>,
    /// Snapshots that failed to write (reported, not fatal)
    pub checkpoint_failures: usize,
    /// Summary writes that failed (reported, not fatal)
    pub summary_failures: usize,
    pub model_definition: PathBuf,
    /// Total training time in seconds
    pub elapsed_secs: f64,
}

impl TrainingResult {
    pub fn final_epoch(&self) -> Option<&EpochLog> {
        self.epochs.last()
    }
}
