//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Experiment name must not be empty")]
    EmptyExperimentName,

    #[error("Training data path does not exist: {0}")]
    TrainDataNotFound(String),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid max_epoch: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid updates_per_epoch: {0} (must be > 0)")]
    InvalidUpdatesPerEpoch(usize),

    #[error("Invalid snapshot_interval: {0} (must be > 0)")]
    InvalidSnapshotInterval(usize),

    #[error("Invalid gen_disc_update_ratio: {0} (must be > 0)")]
    InvalidUpdateRatio(usize),

    #[error("Invalid n_critic: {0} (must be > 0)")]
    InvalidCriticSteps(usize),

    #[error("Invalid info_reg_coeff: {0} (must be finite and >= 0.0)")]
    InvalidInfoCoeff(f32),

    #[error("Invalid learning rate for {player}: {lr} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate { player: &'static str, lr: f32 },

    #[error("Invalid beta1 for {player}: {beta1} (must be in [0.0, 1.0))")]
    InvalidBeta1 { player: &'static str, beta1: f32 },

    #[error("Invalid {name} range: [{lo}, {hi}] (lower bound must not exceed upper bound)")]
    InvalidClipRange { name: &'static str, lo: f32, hi: f32 },

    #[error("Model latent_spec cannot be empty")]
    EmptyLatentSpec,

    #[error("Invalid model output_dim: {0} (must be > 0)")]
    InvalidOutputDim(usize),

    #[error("Data rows have width {data} but the model generates {model}")]
    DataDimMismatch { data: usize, model: usize },

    #[error("Invalid gaussian_mixture: {0}")]
    InvalidMixture(String),
}
