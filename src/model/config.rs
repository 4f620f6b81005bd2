//! Configuration for the reference model

use serde::{Deserialize, Serialize};

use crate::distributions::Distribution;

/// One block of the generator's latent input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatentSpec {
    /// Prior the block is drawn from
    pub dist: Distribution,
    /// Whether the discriminator must recover this block (InfoGAN code)
    #[serde(default)]
    pub regularized: bool,
}

impl LatentSpec {
    pub fn noise(dist: Distribution) -> Self {
        Self { dist, regularized: false }
    }

    pub fn code(dist: Distribution) -> Self {
        Self { dist, regularized: true }
    }
}

/// How the discriminator's score head is squashed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreActivation {
    /// Probability of being real, for the log-loss variants
    #[default]
    Sigmoid,
    /// Unbounded critic value, for the Wasserstein variant
    Linear,
}

/// Configuration for [`super::RegularizedGan`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizedGanConfig {
    /// Latent blocks in generator input order
    pub latent_spec: Vec<LatentSpec>,
    /// Dimension of one data sample
    pub output_dim: usize,
    /// Distribution of the generator output (`mean_bernoulli` or fixed-std `gaussian`)
    #[serde(default)]
    pub output_dist: Option<Distribution>,
    /// Hidden layer sizes of the generator
    #[serde(default = "default_hidden")]
    pub generator_hidden: Vec<usize>,
    /// Hidden layer sizes of the discriminator trunk
    #[serde(default = "default_hidden")]
    pub discriminator_hidden: Vec<usize>,
    /// Negative slope of the discriminator's leaky ReLU
    #[serde(default = "default_slope")]
    pub leaky_slope: f32,
    #[serde(default)]
    pub score_activation: ScoreActivation,
    /// Height and width when a sample is an image, for image summaries
    #[serde(default)]
    pub image_shape: Option<(usize, usize)>,
    /// Weight initialization seed
    #[serde(default)]
    pub seed: u64,
}

fn default_hidden() -> Vec<usize> {
    vec![128]
}

fn default_slope() -> f32 {
    0.2
}

impl RegularizedGanConfig {
    /// Output distribution, a fixed-std Gaussian unless configured
    pub fn output_distribution(&self) -> Distribution {
        self.output_dist
            .clone()
            .unwrap_or(Distribution::Gaussian { dim: self.output_dim, fix_std: true })
    }

    /// Total generator input width
    pub fn latent_dim(&self) -> usize {
        self.latent_spec.iter().map(|s| s.dist.dim()).sum()
    }
}

impl Default for RegularizedGanConfig {
    fn default() -> Self {
        Self {
            latent_spec: vec![
                LatentSpec::noise(Distribution::Uniform { dim: 62, fix_std: false }),
                LatentSpec::code(Distribution::Categorical { dim: 10 }),
                LatentSpec::code(Distribution::Uniform { dim: 1, fix_std: false }),
                LatentSpec::code(Distribution::Uniform { dim: 1, fix_std: false }),
            ],
            output_dim: 784,
            output_dist: Some(Distribution::MeanBernoulli { dim: 784 }),
            generator_hidden: vec![1024, 128],
            discriminator_hidden: vec![1024, 128],
            leaky_slope: 0.1,
            score_activation: ScoreActivation::Sigmoid,
            image_shape: Some((28, 28)),
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mnist_infogan() {
        let config = RegularizedGanConfig::default();
        assert_eq!(config.latent_dim(), 74);
        assert_eq!(config.latent_spec.iter().filter(|s| s.regularized).count(), 3);
    }

    #[test]
    fn test_output_distribution_fallback() {
        let config = RegularizedGanConfig { output_dist: None, output_dim: 2, ..Default::default() };
        assert_eq!(config.output_distribution(), Distribution::Gaussian { dim: 2, fix_std: true });
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r"
latent_spec:
  - dist: { kind: gaussian, dim: 4 }
  - dist: { kind: categorical, dim: 3 }
    regularized: true
output_dim: 2
";
        let config: RegularizedGanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.generator_hidden, vec![128]);
        assert_eq!(config.score_activation, ScoreActivation::Sigmoid);
        assert!(config.latent_spec[1].regularized);
    }
}
