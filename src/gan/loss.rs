//! Adversarial loss strategies

use crate::autograd::{add, add_scalar, ln, mean, scale, sub, Tensor};
use crate::distributions::TINY;

use super::config::Variant;

/// Discriminator and generator losses as functions of the scores on real
/// and generated data. A new GAN variant plugs in here.
pub trait LossPolicy {
    fn discriminator_loss(&self, real_score: &Tensor, fake_score: &Tensor) -> Tensor;

    fn generator_loss(&self, fake_score: &Tensor) -> Tensor;

    fn name(&self) -> &'static str;
}

/// Log-loss of the original GAN, shared by InfoGAN
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLoss;

impl LossPolicy for StandardLoss {
    /// `-mean(ln(real + ε) + ln(1 - fake + ε))`
    fn discriminator_loss(&self, real_score: &Tensor, fake_score: &Tensor) -> Tensor {
        let real = ln(&add_scalar(real_score, TINY));
        // 1.0 + TINY rounds to 1.0 in f32, so ε is added after the subtraction
        let one_minus_fake = add_scalar(&scale(fake_score, -1.0), 1.0);
        let fake = ln(&add_scalar(&one_minus_fake, TINY));
        scale(&mean(&add(&real, &fake)), -1.0)
    }

    /// `-mean(ln(fake + ε))`
    fn generator_loss(&self, fake_score: &Tensor) -> Tensor {
        scale(&mean(&ln(&add_scalar(fake_score, TINY))), -1.0)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Critic objective of the Wasserstein GAN
#[derive(Debug, Clone, Copy, Default)]
pub struct WassersteinLoss;

impl LossPolicy for WassersteinLoss {
    /// `mean(real - fake)`
    fn discriminator_loss(&self, real_score: &Tensor, fake_score: &Tensor) -> Tensor {
        mean(&sub(real_score, fake_score))
    }

    /// `mean(fake)`
    fn generator_loss(&self, fake_score: &Tensor) -> Tensor {
        mean(fake_score)
    }

    fn name(&self) -> &'static str {
        "wasserstein"
    }
}

/// Loss strategy for a variant
pub fn loss_policy(variant: Variant) -> Box<dyn LossPolicy> {
    match variant {
        Variant::Standard | Variant::InfoGan => Box::new(StandardLoss),
        Variant::Wasserstein => Box::new(WassersteinLoss),
    }
}
