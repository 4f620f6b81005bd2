//! Split of trainable variables between the two players

use crate::autograd::Tensor;
use crate::{Error, Result};

pub const DISCRIMINATOR_PREFIX: &str = "d_";
pub const GENERATOR_PREFIX: &str = "g_";

/// Disjoint discriminator-owned and generator-owned parameters
#[derive(Debug, Clone)]
pub struct VariablePartition {
    pub discriminator: Vec<Tensor>,
    pub generator: Vec<Tensor>,
}

impl VariablePartition {
    /// Partition by name prefix; an unnamed parameter or one matching neither
    /// prefix is a configuration error.
    pub fn from_parameters(params: Vec<Tensor>) -> Result<Self> {
        let mut discriminator = Vec::new();
        let mut generator = Vec::new();
        for param in params {
            let name = param.name().unwrap_or_default().to_string();
            if name.starts_with(DISCRIMINATOR_PREFIX) {
                discriminator.push(param);
            } else if name.starts_with(GENERATOR_PREFIX) {
                generator.push(param);
            } else {
                return Err(Error::UnpartitionedVariable { name });
            }
        }
        Ok(Self { discriminator, generator })
    }
}
