//! Models driven by the adversarial trainer
//!
//! The trainer only sees the [`GanModel`] trait. [`RegularizedGan`] is the
//! bundled MLP implementation used by the CLI and the integration tests.

mod config;
mod definition;
mod latent;
mod layers;
mod regularized_gan;


pub use config::{LatentSpec, RegularizedGanConfig, ScoreActivation};
pub use definition::{ModelDefinition, ParameterInfo};
pub use latent::LatentLayout;
pub use layers::Linear;
pub use regularized_gan::RegularizedGan;

use crate::autograd::Tensor;
use crate::distributions::DistInfo;
use crate::Result;

/// Output of the generation path for `n` latent rows
#[derive(Debug, Clone)]
pub struct Generated {
    /// `n x output_dim` samples
    pub sample: Tensor,
    /// Raw output-distribution parameters
    pub dist_flat: Tensor,
    /// Activated output-distribution parameters
    pub dist_info: DistInfo,
}

/// Output of the discrimination path for `n` data rows
#[derive(Debug, Clone)]
pub struct Discriminated {
    /// Per-row score: probability of being real, or the critic value
    pub score: Tensor,
    /// Per-row score before the output activation
    pub logits: Tensor,
    /// Posterior over the regularized latent codes
    pub reg_dist_info: DistInfo,
    /// Last trunk activations, `n x features_dim`
    pub features: Tensor,
}

/// A differentiable generator/discriminator pair.
///
/// Trainable parameter names must start with `d_` (discriminator) or `g_`
/// (generator); the trainer partitions on that prefix.
pub trait GanModel {
    /// Latent layout and priors of the generator input
    fn latent(&self) -> &LatentLayout;

    /// Width of one data sample
    fn output_dim(&self) -> usize;

    /// Map `n` latent rows to samples
    fn generate(&self, z: &Tensor, n: usize) -> Result<Generated>;

    /// Score `n` data rows
    fn discriminate(&self, x: &Tensor, n: usize) -> Result<Discriminated>;

    /// Every trainable parameter, in a stable order
    fn parameters(&self) -> Vec<Tensor>;

    /// Serializable description written before training starts
    fn definition(&self) -> Result<ModelDefinition>;

    /// Height and width if a sample is an image
    fn image_shape(&self) -> Option<(usize, usize)> {
        None
    }
}
