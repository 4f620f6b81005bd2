//! Train command implementation

use crate::cli::args::TrainArgs;
use crate::config::{apply_overrides, load_config, GanSpec};
use crate::gan::build_training_graph;
use crate::logging::{log, LogLevel};

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Adversario: Training from {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, args.overrides()).map_err(|e| format!("Config error: {e}"))?;

    let mut trainer = spec.build_trainer(level).map_err(|e| format!("Setup error: {e}"))?;

    if args.dry_run {
        let graph = build_training_graph(trainer.model(), trainer.config())
            .map_err(|e| format!("Setup error: {e}"))?;
        log(level, LogLevel::Normal, "Dry run - model and training graph built successfully");
        log(level, LogLevel::Verbose, &describe(&spec));
        log(
            level,
            LogLevel::Verbose,
            &format!("  Logged metrics: {}", graph.log_keys().join(", ")),
        );
        return Ok(());
    }

    let result = trainer.train().map_err(|e| format!("Training error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training complete: {} steps ({} discriminator, {} generator) in {:.1}s",
            result.global_step,
            result.discriminator_steps,
            result.generator_steps,
            result.elapsed_secs
        ),
    );
    if result.checkpoint_failures + result.summary_failures > 0 {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "  {} checkpoint and {} summary writes failed",
                result.checkpoint_failures, result.summary_failures
            ),
        );
    }
    Ok(())
}

fn describe(spec: &GanSpec) -> String {
    let config = spec.trainer_config(LogLevel::Quiet);
    [
        format!("  Variant: {}", config.variant),
        format!(
            "  Discriminator optimizer: {:?} (lr={})",
            config.discrim_optimizer.name, config.discrim_optimizer.lr
        ),
        format!(
            "  Generator optimizer: {:?} (lr={})",
            config.generator_optimizer.name, config.generator_optimizer.lr
        ),
        format!("  Epochs: {} x {} updates", config.max_epoch, config.updates_per_epoch),
        format!("  Batch size: {}", config.batch_size),
    ]
    .join("\n")
}
