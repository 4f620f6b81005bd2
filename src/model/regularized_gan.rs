//! MLP generator and discriminator with a latent posterior head

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::{RegularizedGanConfig, ScoreActivation};
use super::definition::{ModelDefinition, ParameterInfo};
use super::latent::LatentLayout;
use super::layers::{stack, Linear};
use super::{Discriminated, GanModel, Generated};
use crate::autograd::{leaky_relu, relu, sigmoid, Tensor};
use crate::distributions::{DistInfo, Distribution};
use crate::{Error, Result};

const ARCHITECTURE: &str = "regularized_gan";

/// Generator `z -> x` and a discriminator trunk shared by a real/fake score
/// head and a head predicting the posterior over the regularized codes.
#[derive(Debug, Clone)]
pub struct RegularizedGan {
    config: RegularizedGanConfig,
    layout: LatentLayout,
    output_dist: Distribution,
    generator: Vec<Linear>,
    trunk: Vec<Linear>,
    score_head: Linear,
    latent_head: Option<Linear>,
}

impl RegularizedGan {
    pub fn new(config: RegularizedGanConfig) -> Result<Self> {
        let latent_dim = config.latent_dim();
        if latent_dim == 0 {
            return Err(Error::Config("latent_spec must contain at least one dimension".into()));
        }
        if config.output_dim == 0 {
            return Err(Error::Config("output_dim must be > 0".into()));
        }
        let output_dist = config.output_distribution();
        if output_dist.dim() != config.output_dim {
            return Err(Error::ShapeMismatch {
                expected: config.output_dim,
                actual: output_dist.dim(),
            });
        }
        if let Some((h, w)) = config.image_shape {
            if h * w != config.output_dim {
                return Err(Error::Config(format!(
                    "image_shape {h}x{w} does not cover output_dim {}",
                    config.output_dim
                )));
            }
        }

        let layout = LatentLayout::new(config.latent_spec.clone());
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut g_dims = vec![latent_dim];
        g_dims.extend(&config.generator_hidden);
        g_dims.push(output_dist.dist_flat_dim());
        let generator = stack("g_fc", &g_dims, &mut rng);

        let mut d_dims = vec![config.output_dim];
        d_dims.extend(&config.discriminator_hidden);
        let trunk = stack("d_fc", &d_dims, &mut rng);
        let features_dim = d_dims.last().copied().unwrap_or(config.output_dim);

        let score_head = Linear::new("d_score", features_dim, 1, &mut rng);
        let reg_flat_dim = layout.reg_latent_dist().dist_flat_dim();
        let latent_head = (reg_flat_dim > 0)
            .then(|| Linear::new("d_latent", features_dim, reg_flat_dim, &mut rng));

        Ok(Self { config, layout, output_dist, generator, trunk, score_head, latent_head })
    }

    /// Rebuild from a definition written by [`GanModel::definition`]
    pub fn from_definition(definition: &ModelDefinition) -> Result<Self> {
        if definition.architecture != ARCHITECTURE {
            return Err(Error::Config(format!(
                "unsupported architecture '{}', expected '{ARCHITECTURE}'",
                definition.architecture
            )));
        }
        let config: RegularizedGanConfig = serde_json::from_value(definition.config.clone())
            .map_err(|e| Error::Serialization(format!("invalid model config: {e}")))?;
        let model = Self::new(config)?;
        definition.check_parameters(&model.parameters())?;
        Ok(model)
    }

    pub fn config(&self) -> &RegularizedGanConfig {
        &self.config
    }

    fn layers(&self) -> impl Iterator<Item = &Linear> {
        self.generator
            .iter()
            .chain(&self.trunk)
            .chain(std::iter::once(&self.score_head))
            .chain(&self.latent_head)
    }
}

impl GanModel for RegularizedGan {
    fn latent(&self) -> &LatentLayout {
        &self.layout
    }

    fn output_dim(&self) -> usize {
        self.config.output_dim
    }

    fn generate(&self, z: &Tensor, n: usize) -> Result<Generated> {
        let last = self.generator.len().saturating_sub(1);
        let mut h = z.clone();
        for (i, layer) in self.generator.iter().enumerate() {
            h = layer.forward(&h, n)?;
            if i < last {
                h = relu(&h);
            }
        }
        let dist_info = self.output_dist.activate_dist(&h, n)?;
        // the sample is the mean of the output distribution
        let key = match self.output_dist {
            Distribution::MeanBernoulli { .. } => "p",
            _ => "mean",
        };
        let sample = dist_info.require(key)?.clone();
        Ok(Generated { sample, dist_flat: h, dist_info })
    }

    fn discriminate(&self, x: &Tensor, n: usize) -> Result<Discriminated> {
        let mut h = x.clone();
        for layer in &self.trunk {
            h = leaky_relu(&layer.forward(&h, n)?, self.config.leaky_slope);
        }
        let logits = self.score_head.forward(&h, n)?;
        let score = match self.config.score_activation {
            ScoreActivation::Sigmoid => sigmoid(&logits),
            ScoreActivation::Linear => logits.clone(),
        };
        let reg_dist_info = match &self.latent_head {
            Some(head) => self.layout.reg_latent_dist().activate_dist(&head.forward(&h, n)?, n)?,
            None => DistInfo::new(),
        };
        Ok(Discriminated { score, logits, reg_dist_info, features: h })
    }

    fn parameters(&self) -> Vec<Tensor> {
        self.layers().flat_map(Linear::parameters).collect()
    }

    fn definition(&self) -> Result<ModelDefinition> {
        let config = serde_json::to_value(&self.config)
            .map_err(|e| Error::ModelDefinition(format!("config is not serializable: {e}")))?;
        let parameters = self
            .layers()
            .flat_map(|layer| {
                [(layer.weight.clone(), vec![layer.in_dim, layer.out_dim]), (layer.bias.clone(), vec![layer.out_dim])]
            })
            .map(|(tensor, shape)| ParameterInfo::new(tensor.name().unwrap_or_default(), shape))
            .collect();
        Ok(ModelDefinition::new(ARCHITECTURE, config, parameters))
    }

    fn image_shape(&self) -> Option<(usize, usize)> {
        self.config.image_shape
    }
}
