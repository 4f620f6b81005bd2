//! Validate command implementation

use crate::cli::args::ValidateArgs;
use crate::config::{load_config, GanSpec};
use crate::logging::{log, LogLevel};

/// Format the model section as a string
pub fn format_model_info(spec: &GanSpec) -> String {
    let model = spec.model_config();
    let codes = model.latent_spec.iter().filter(|s| s.regularized).count();
    format!(
        "  Latent: {} dims in {} blocks ({} regularized)\n  Output dim: {}\n  Hidden: G {:?}, D {:?}",
        model.latent_dim(),
        model.latent_spec.len(),
        codes,
        model.output_dim,
        model.generator_hidden,
        model.discriminator_hidden
    )
}

/// Format the training section as a string
pub fn format_training_info(spec: &GanSpec) -> String {
    let training = &spec.training;
    let mut lines = vec![
        format!("  Variant: {}", spec.variant),
        format!("  Batch size: {}", training.batch_size),
        format!("  Epochs: {} x {} updates", training.max_epoch, training.updates_per_epoch),
        format!("  Snapshot interval: {}", training.snapshot_interval),
    ];
    if let Some(clip) = training.discriminator_grad_clip {
        lines.push(format!("  Discriminator grad clip: [{}, {}]", clip.lo(), clip.hi()));
    }
    if let Some(clip) = training.generator_grad_clip {
        lines.push(format!("  Generator grad clip: [{}, {}]", clip.lo(), clip.hi()));
    }
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");
    log(level, LogLevel::Verbose, &format_model_info(&spec));
    log(level, LogLevel::Verbose, &format_training_info(&spec));
    Ok(())
}
