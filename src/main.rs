//! Adversario CLI
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! adversario train gan.yaml
//!
//! # Train with overrides
//! adversario train gan.yaml --epochs 10 --seed 3
//!
//! # Validate config
//! adversario validate gan.yaml
//!
//! # Sample from a checkpoint
//! adversario sample ckt/experiment_500.ckpt --z 0.1,0.2,...
//! ```

use adversario::cli::{run_command, Cli};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
