//! Sample command implementation

use crate::cli::args::SampleArgs;
use crate::gan::{sample, SampleRequest};
use crate::logging::{log, LogLevel};

pub fn run_sample(args: SampleArgs, level: LogLevel) -> Result<(), String> {
    let request = SampleRequest {
        checkpoint: args.checkpoint,
        z: args.z,
        log_dir: args.log_dir,
        checkpoint_root: args.checkpoint_root,
        seed: args.seed,
        log_level: level,
    };
    let output = sample(&request).map_err(|e| format!("Sampling error: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  Sample values: {:?}", &output.sample[..output.sample.len().min(8)]),
    );
    Ok(())
}
