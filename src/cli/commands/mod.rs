//! CLI command implementations

mod sample;
mod train;
mod validate;


use super::args::{Cli, Command};
use crate::logging::LogLevel;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Train(args) => train::run_train(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Sample(args) => sample::run_sample(args, log_level),
    }
}
