//! Restore a trained generator and write one sample as an image summary

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::checkpoint::{load_checkpoint, restore_parameters, CHECKPOINT_EXTENSION, MODEL_DEFINITION_FILE};
use super::summary::{ImageSummary, SummaryWriter};
use crate::autograd::Tensor;
use crate::logging::{log, LogLevel};
use crate::model::{GanModel, ModelDefinition, RegularizedGan};
use crate::{Error, Result};

/// Inputs of a sampling run
#[derive(Debug, Clone)]
pub struct SampleRequest {
    /// Snapshot to restore; a trailing `.meta` is tolerated
    pub checkpoint: PathBuf,
    /// Explicit latent vector; drawn from the prior when absent
    pub z: Option<Vec<f32>>,
    pub log_dir: PathBuf,
    /// Directory checkpoints are organised under; the sample directory mirrors
    /// the checkpoint's location relative to it
    pub checkpoint_root: PathBuf,
    pub seed: u64,
    pub log_level: LogLevel,
}

impl SampleRequest {
    pub fn new(checkpoint: impl Into<PathBuf>) -> Self {
        Self {
            checkpoint: checkpoint.into(),
            z: None,
            log_dir: PathBuf::from("logs"),
            checkpoint_root: PathBuf::from("ckt"),
            seed: 0,
            log_level: LogLevel::Normal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleOutput {
    /// `{log_dir}/{checkpoint subdir}/samples_{timestamp}`
    pub dir: PathBuf,
    pub sample: Vec<f32>,
}

/// Map `x.ckpt.meta` and `x` to `x.ckpt`
pub fn normalize_checkpoint_path(path: &Path) -> PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().is_some_and(|ext| ext == "meta") {
        path.set_extension("");
    }
    if path.extension().is_some_and(|ext| ext == CHECKPOINT_EXTENSION) {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".");
        name.push(CHECKPOINT_EXTENSION);
        PathBuf::from(name)
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y_%m_%d_%H_%M_%S").to_string()
}

/// Output directory for samples of `checkpoint`
pub fn samples_dir(log_dir: &Path, checkpoint_root: &Path, checkpoint: &Path) -> PathBuf {
    let parent = checkpoint.parent().unwrap_or(Path::new(""));
    let subdir = parent.strip_prefix(checkpoint_root).unwrap_or(parent);
    // absolute checkpoints outside the root keep only their own directory name
    let subdir = if subdir.is_absolute() {
        subdir.file_name().map(PathBuf::from).unwrap_or_default()
    } else {
        subdir.to_path_buf()
    };
    log_dir.join(subdir).join(format!("samples_{}", timestamp()))
}

/// Restore the model next to `request.checkpoint` and generate one sample
pub fn sample(request: &SampleRequest) -> Result<SampleOutput> {
    let level = request.log_level;
    let checkpoint_path = normalize_checkpoint_path(&request.checkpoint);
    let model_dir = checkpoint_path.parent().unwrap_or(Path::new(""));

    log(level, LogLevel::Normal, "Importing model definition");
    let definition = ModelDefinition::load(model_dir.join(MODEL_DEFINITION_FILE))?;
    let model = RegularizedGan::from_definition(&definition)?;
    let checkpoint = load_checkpoint(&checkpoint_path)?;
    restore_parameters(&model.parameters(), &checkpoint)?;

    let latent = model.latent().latent_dist();
    let z = match &request.z {
        Some(values) => {
            log(level, LogLevel::Normal, "Using supplied latent vector");
            if values.len() != latent.dim() {
                return Err(Error::ShapeMismatch { expected: latent.dim(), actual: values.len() });
            }
            Tensor::from_vec(values.clone(), false)
        }
        None => latent.sample_prior(1, &mut StdRng::seed_from_u64(request.seed)),
    };

    log(level, LogLevel::Normal, "Sampling");
    let generated = model.generate(&z, 1)?;
    let pixels = generated.sample.to_vec();
    let (height, width) = model.image_shape().unwrap_or((1, pixels.len()));

    let dir = samples_dir(&request.log_dir, &request.checkpoint_root, &checkpoint_path);
    let mut writer = SummaryWriter::open(&dir)?;
    writer.write_image(0, "samples", ImageSummary { height, width, count: 1, pixels: pixels.clone() })?;
    log(level, LogLevel::Normal, &format!("Samples written to {}", dir.display()));

    Ok(SampleOutput { dir, sample: pixels })
}
