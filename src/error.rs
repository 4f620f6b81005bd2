//! Crate-wide error type

/// Result type for adversario operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or running adversarial training
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Trainable variable '{name}' matches neither the 'd_' nor the 'g_' prefix")]
    UnpartitionedVariable { name: String },

    #[error("NaN detected in epoch {epoch} (metric '{metric}')")]
    Divergence { epoch: usize, metric: String },

    #[error("Failed to persist model definition: {0}")]
    ModelDefinition(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("Summary error: {0}")]
    Summary(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
