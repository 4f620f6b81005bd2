//! Serializable model definition written once before training

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::autograd::Tensor;
use crate::{Error, Result};

/// Enough to rebuild a model before its weights are restored from a checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model architecture type (e.g. "regularized_gan")
    pub architecture: String,

    /// Crate version that wrote the definition
    pub version: String,

    /// Architecture-specific configuration
    pub config: serde_json::Value,

    /// Trainable parameters in registration order
    pub parameters: Vec<ParameterInfo>,
}

/// Information about a model parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (e.g. "d_fc0_w")
    pub name: String,

    /// Parameter shape
    pub shape: Vec<usize>,

    /// Data type, always "f32"
    pub dtype: String,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, shape: Vec<usize>) -> Self {
        Self { name: name.into(), shape, dtype: "f32".to_string() }
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }
}

impl ModelDefinition {
    pub fn new(
        architecture: impl Into<String>,
        config: serde_json::Value,
        parameters: Vec<ParameterInfo>,
    ) -> Self {
        Self {
            architecture: architecture.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            parameters,
        }
    }

    /// Write as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a definition written by [`ModelDefinition::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))
    }

    /// Check that live parameters agree with the recorded names and sizes
    pub fn check_parameters(&self, params: &[Tensor]) -> Result<()> {
        if params.len() != self.parameters.len() {
            return Err(Error::ShapeMismatch {
                expected: self.parameters.len(),
                actual: params.len(),
            });
        }
        for (info, param) in self.parameters.iter().zip(params) {
            if param.name() != Some(info.name.as_str()) {
                return Err(Error::Config(format!(
                    "parameter '{}' does not match definition entry '{}'",
                    param.name().unwrap_or("<unnamed>"),
                    info.name
                )));
            }
            if param.len() != info.numel() {
                return Err(Error::ShapeMismatch { expected: info.numel(), actual: param.len() });
            }
        }
        Ok(())
    }
}
