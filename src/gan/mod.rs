//! Adversarial training: variant strategies, update schedules, the epoch
//! loop and its artifacts.
//!
//! The three variants differ only in the strategies the
//! [`TrainingGraph`] is built from:
//!
//! | Variant | Loss | Schedule | MI bonus |
//! |---|---|---|---|
//! | Standard | cross-entropy | alternating | no |
//! | InfoGAN | cross-entropy | alternating | yes |
//! | Wasserstein | critic difference | `n_critic` + clamp | no |

pub mod checkpoint;
pub mod config;
pub mod graph;
pub mod info;
pub mod log;
pub mod loss;
pub mod partition;
pub mod policy;
pub mod sample;
pub mod step;
pub mod summary;
pub mod trainer;

pub use checkpoint::{load_checkpoint, restore_parameters, save_checkpoint, Checkpoint, CheckpointSaver};
pub use config::{ClipRange, OptimizerKind, OptimizerSpec, TrainerConfig, Variant};
pub use graph::{build_training_graph, ForwardPass, TrainingGraph};
pub use info::{InfoEstimate, InfoRegularizer};
pub use log::{EpochLog, LogRecord};
pub use loss::{loss_policy, LossPolicy, StandardLoss, WassersteinLoss};
pub use partition::VariablePartition;
pub use policy::{StepContext, UpdatePolicy, WeightClamp};
pub use sample::{sample, SampleOutput, SampleRequest};
pub use step::{build_step, TrainStep};
pub use summary::{read_events, SummaryRecord, SummaryValue, SummaryWriter};
pub use trainer::{GanTrainer, TrainerState, TrainingResult};
