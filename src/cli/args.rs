//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::TrainOverrides;

/// Adversario: GAN, InfoGAN and Wasserstein GAN training
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "adversario")]
#[command(version)]
#[command(about = "Adversarial training of GAN, InfoGAN and Wasserstein GAN models")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train a model from YAML configuration
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Generate a sample from a saved checkpoint
    Sample(SampleArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Save a checkpoint every N global steps
    #[arg(long)]
    pub snapshot_interval: Option<usize>,

    /// Random seed for data and latent sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Build the model and training graph but don't train
    #[arg(long)]
    pub dry_run: bool,
}

impl TrainArgs {
    pub fn overrides(&self) -> TrainOverrides {
        TrainOverrides {
            epochs: self.epochs,
            batch_size: self.batch_size,
            snapshot_interval: self.snapshot_interval,
            seed: self.seed,
        }
    }
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Arguments for the sample command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SampleArgs {
    /// Checkpoint file (`.ckpt`, a trailing `.meta` is accepted)
    #[arg(value_name = "CHECKPOINT")]
    pub checkpoint: PathBuf,

    /// Latent vector, comma separated; drawn from the prior when omitted
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub z: Option<Vec<f32>>,

    /// Root of the summary output
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Directory checkpoints are kept under
    #[arg(long, default_value = "ckt")]
    pub checkpoint_root: PathBuf,

    /// Seed for the prior draw
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
