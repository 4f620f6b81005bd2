//! Adversarial training of generative models.
//!
//! This crate trains GAN, InfoGAN and Wasserstein GAN models:
//! - A define-by-run autograd engine with the ops the networks need
//! - Variant-specific losses, optimizers and update schedules
//! - Mutual-information regularization over latent codes (InfoGAN)
//! - Checkpoints, a JSON-lines summary stream and a sampling entrypoint
//!
//! # Example
//!
//! ```no_run
//! use adversario::data::GaussianMixture;
//! use adversario::distributions::Distribution;
//! use adversario::gan::{GanTrainer, TrainerConfig, Variant};
//! use adversario::model::{LatentSpec, RegularizedGan, RegularizedGanConfig};
//!
//! let model = RegularizedGan::new(RegularizedGanConfig {
//!     latent_spec: vec![
//!         LatentSpec::noise(Distribution::Uniform { dim: 4, fix_std: true }),
//!         LatentSpec::code(Distribution::Categorical { dim: 8 }),
//!     ],
//!     output_dim: 2,
//!     output_dist: None,
//!     image_shape: None,
//!     ..Default::default()
//! })?;
//! let data = GaussianMixture::new(8, 2.0, 0.02, 0)?;
//! let mut trainer = GanTrainer::new(model, data, TrainerConfig::for_variant(Variant::InfoGan))?;
//! let result = trainer.train()?;
//! println!("{}", result.final_epoch().map(|e| e.line()).unwrap_or_default());
//! # Ok::<(), adversario::Error>(())
//! ```

pub mod autograd;
pub mod cli;
pub mod config;
pub mod data;
pub mod distributions;
pub mod error;
pub mod gan;
pub mod logging;
pub mod model;
pub mod optim;

pub use autograd::Tensor;
pub use error::{Error, Result};
