//! Latent code distributions
//!
//! Priors are sampled to feed the generator; posteriors are parameterized by
//! the discriminator's latent head through [`Distribution::activate_dist`].
//! Every log-likelihood is computed per row with the autograd ops so the
//! mutual-information bonus backpropagates into both networks.

mod info;
mod leaf;
mod product;
pub(crate) mod sampling;

#[cfg(test)]
mod tests;

pub use info::{DistInfo, TINY};
pub use leaf::Distribution;
pub use product::Product;
