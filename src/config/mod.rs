//! Declarative training configuration
//!
//! A YAML [`GanSpec`] names the variant, the model, the data source and the
//! hyperparameters. [`load_config`] parses and validates it; the parsed value then
//! builds the [`crate::gan::TrainerConfig`], model and dataset.

mod loader;
mod schema;
pub mod validate;

pub use loader::{apply_overrides, load_config, train_from_yaml, TrainOverrides};
pub use schema::{DataSpec, ExperimentSpec, GanSpec, OptimizerOverrides, TrainingParams};
pub use validate::{validate_config, ValidationError};
