//! Model definition and parameter snapshots on disk

use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::autograd::Tensor;
use crate::model::GanModel;
use crate::{Error, Result};

pub const MODEL_DEFINITION_FILE: &str = "model.json";
pub const CHECKPOINT_EXTENSION: &str = "ckpt";

/// Write `{dir}/model.json`; any failure is a [`Error::ModelDefinition`]
pub fn save_model_definition<M: GanModel + ?Sized>(model: &M, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::ModelDefinition(format!("cannot create {}: {e}", dir.display())))?;
    let path = dir.join(MODEL_DEFINITION_FILE);
    model
        .definition()
        .and_then(|definition| definition.save(&path))
        .map_err(|e| match e {
            Error::ModelDefinition(_) => e,
            other => Error::ModelDefinition(other.to_string()),
        })?;
    Ok(path)
}

/// Snapshot name for a global step: `{exp_name}_{step}`
pub fn checkpoint_name(exp_name: &str, step: usize) -> String {
    format!("{exp_name}_{step}")
}

/// Saves parameter snapshots every `interval` global steps
#[derive(Debug, Clone)]
pub struct CheckpointSaver {
    dir: PathBuf,
    exp_name: String,
    interval: usize,
}

impl CheckpointSaver {
    pub fn new(dir: impl Into<PathBuf>, exp_name: impl Into<String>, interval: usize) -> Self {
        Self { dir: dir.into(), exp_name: exp_name.into(), interval }
    }

    /// Whether global step `step` is a snapshot step
    pub fn is_due(&self, step: usize) -> bool {
        self.interval > 0 && step > 0 && step % self.interval == 0
    }

    /// Path of the snapshot for `step`
    pub fn path(&self, step: usize) -> PathBuf {
        self.dir
            .join(format!("{}.{CHECKPOINT_EXTENSION}", checkpoint_name(&self.exp_name, step)))
    }

    pub fn save(&self, step: usize, params: &[Tensor]) -> Result<PathBuf> {
        let path = self.path(step);
        let mut metadata = HashMap::new();
        metadata.insert("experiment".to_string(), self.exp_name.clone());
        metadata.insert("global_step".to_string(), step.to_string());
        save_checkpoint(&path, params, metadata)?;
        Ok(path)
    }
}

/// Named parameter values read from a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub tensors: Vec<(String, Vec<f32>)>,
    pub metadata: HashMap<String, String>,
}

impl Checkpoint {
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.tensors.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_slice())
    }

    /// Global step recorded at save time
    pub fn global_step(&self) -> Option<usize> {
        self.metadata.get("global_step").and_then(|s| s.parse().ok())
    }
}

/// Encode named parameters as safetensors
pub fn save_checkpoint(
    path: &Path,
    params: &[Tensor],
    metadata: HashMap<String, String>,
) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::Checkpoint(format!("cannot create {}: {e}", dir.display())))?;
    }

    let mut tensor_data: Vec<(String, Vec<u8>, Vec<usize>)> = Vec::with_capacity(params.len());
    for param in params {
        let name = param
            .name()
            .ok_or_else(|| Error::Checkpoint("cannot snapshot an unnamed parameter".into()))?;
        let values = param.to_vec();
        let bytes: Vec<u8> = bytemuck::cast_slice(&values).to_vec();
        tensor_data.push((name.to_string(), bytes, vec![values.len()]));
    }

    let views = tensor_data
        .iter()
        .map(|(name, bytes, shape)| {
            TensorView::new(Dtype::F32, shape.clone(), bytes)
                .map(|view| (name.as_str(), view))
                .map_err(|e| Error::Checkpoint(format!("tensor '{name}': {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let encoded = safetensors::serialize(views, Some(metadata))
        .map_err(|e| Error::Checkpoint(format!("SafeTensors serialization failed: {e}")))?;
    std::fs::write(path, encoded)
        .map_err(|e| Error::Checkpoint(format!("write to {} failed: {e}", path.display())))?;
    Ok(())
}

/// Decode a snapshot written by [`save_checkpoint`]
pub fn load_checkpoint(path: &Path) -> Result<Checkpoint> {
    let buffer = std::fs::read(path)
        .map_err(|e| Error::Checkpoint(format!("cannot read {}: {e}", path.display())))?;
    let (_, header) = SafeTensors::read_metadata(&buffer)
        .map_err(|e| Error::Checkpoint(format!("invalid checkpoint header: {e}")))?;
    let metadata = header.metadata().clone().unwrap_or_default();
    let tensors = SafeTensors::deserialize(&buffer)
        .map_err(|e| Error::Checkpoint(format!("invalid checkpoint: {e}")))?;

    let mut names: Vec<String> = tensors.names().into_iter().map(ToString::to_string).collect();
    names.sort();
    let mut loaded = Vec::with_capacity(names.len());
    for name in names {
        let view = tensors
            .tensor(&name)
            .map_err(|e| Error::Checkpoint(format!("tensor '{name}': {e}")))?;
        if view.dtype() != Dtype::F32 {
            return Err(Error::Checkpoint(format!("tensor '{name}' is not f32")));
        }
        let values: Vec<f32> = view
            .data()
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        loaded.push((name, values));
    }
    Ok(Checkpoint { tensors: loaded, metadata })
}

/// Copy snapshot values into live parameters, matched by name
pub fn restore_parameters(params: &[Tensor], checkpoint: &Checkpoint) -> Result<()> {
    for param in params {
        let name = param.name().unwrap_or_default();
        let values = checkpoint
            .get(name)
            .ok_or_else(|| Error::Checkpoint(format!("checkpoint has no tensor '{name}'")))?;
        if values.len() != param.len() {
            return Err(Error::ShapeMismatch { expected: param.len(), actual: values.len() });
        }
        param.data_mut().assign(&ndarray::ArrayView1::from(values));
    }
    Ok(())
}
