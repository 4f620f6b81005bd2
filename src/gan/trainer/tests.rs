use super::*;
use crate::autograd::Tensor;
use crate::data::{Batch, GaussianMixture};
use crate::distributions::Distribution;
use crate::gan::checkpoint::{load_checkpoint, MODEL_DEFINITION_FILE};
use crate::gan::config::{ClipRange, Variant};
use crate::gan::summary::{read_events, SummaryValue, EVENTS_FILE};
use crate::model::{LatentSpec, RegularizedGan, RegularizedGanConfig, ScoreActivation};
use tempfile::TempDir;

fn model(score_activation: ScoreActivation) -> RegularizedGan {
    RegularizedGan::new(RegularizedGanConfig {
        latent_spec: vec![
            LatentSpec::noise(Distribution::Uniform { dim: 2, fix_std: true }),
            LatentSpec::code(Distribution::Categorical { dim: 2 }),
            LatentSpec::code(Distribution::Uniform { dim: 1, fix_std: true }),
        ],
        output_dim: 2,
        output_dist: None,
        generator_hidden: vec![4],
        discriminator_hidden: vec![4],
        leaky_slope: 0.2,
        score_activation,
        image_shape: None,
        seed: 3,
    })
    .unwrap()
}

fn config(variant: Variant, dir: &TempDir) -> TrainerConfig {
    TrainerConfig {
        batch_size: 8,
        max_epoch: 2,
        updates_per_epoch: 3,
        snapshot_interval: 4,
        log_dir: dir.path().join("logs"),
        checkpoint_dir: dir.path().join("ckt"),
        exp_name: "unit".to_string(),
        log_level: LogLevel::Quiet,
        ..TrainerConfig::for_variant(variant)
    }
}

fn mixture() -> GaussianMixture {
    GaussianMixture::new(4, 1.0, 0.05, 9).unwrap()
}

/// Emits NaN samples so every metric diverges
struct NanData;

impl Dataset for NanData {
    fn dim(&self) -> usize {
        2
    }

    fn next_batch(&mut self, batch_size: usize) -> Result<Batch> {
        Ok(Batch::new(Tensor::from_vec(vec![f32::NAN; batch_size * 2], false), batch_size, 2))
    }
}

#[test]
fn test_rejects_dataset_width_mismatch() {
    let dir = TempDir::new().unwrap();
    let data = GaussianMixture::new(4, 1.0, 0.05, 0).unwrap();
    let mut cfg = model(ScoreActivation::Sigmoid).config().clone();
    cfg.output_dim = 3;
    let wide = RegularizedGan::new(cfg).unwrap();
    let err = GanTrainer::new(wide, data, config(Variant::InfoGan, &dir)).err().unwrap();
    assert!(matches!(err, Error::ShapeMismatch { expected: 3, actual: 2 }));
}

#[test]
fn test_infogan_run_completes() {
    let dir = TempDir::new().unwrap();
    let mut trainer =
        GanTrainer::new(model(ScoreActivation::Sigmoid), mixture(), config(Variant::InfoGan, &dir))
            .unwrap();
    assert_eq!(trainer.state(), TrainerState::Uninitialized);

    let result = trainer.train().unwrap();
    assert_eq!(trainer.state(), TrainerState::Completed);
    assert_eq!(result.global_step, 6);
    assert_eq!(result.generator_steps, 6);
    assert_eq!(result.discriminator_steps, 6);
    assert_eq!(result.epochs.len(), 2);
    assert_eq!(result.checkpoints.len(), 1);
    assert!(result.checkpoints[0].ends_with("unit_4.ckpt"));
    assert!(result.final_epoch().unwrap().get("MI").is_some());
}

#[test]
fn test_artifacts_written() {
    let dir = TempDir::new().unwrap();
    let mut trainer =
        GanTrainer::new(model(ScoreActivation::Sigmoid), mixture(), config(Variant::Standard, &dir))
            .unwrap();
    let result = trainer.train().unwrap();

    assert_eq!(result.model_definition, dir.path().join("ckt").join(MODEL_DEFINITION_FILE));
    assert!(result.model_definition.exists());

    let ckpt = load_checkpoint(&result.checkpoints[0]).unwrap();
    assert_eq!(ckpt.global_step(), Some(4));
    assert!(ckpt.get("d_score_w").is_some());

    let events = read_events(dir.path().join("logs").join(EVENTS_FILE)).unwrap();
    // six scalars per epoch, two epochs
    assert_eq!(events.len(), 12);
    assert!(events.iter().all(|e| matches!(e.value, SummaryValue::Scalar(_))));
    assert_eq!(events[0].step, 3);
    assert_eq!(events[6].step, 6);
}

#[test]
fn test_update_ratio_skips_discriminator() {
    let dir = TempDir::new().unwrap();
    let cfg = TrainerConfig {
        gen_disc_update_ratio: 3,
        updates_per_epoch: 9,
        max_epoch: 1,
        ..config(Variant::Standard, &dir)
    };
    let mut trainer = GanTrainer::new(model(ScoreActivation::Sigmoid), mixture(), cfg).unwrap();
    let result = trainer.train().unwrap();
    assert_eq!(result.discriminator_steps, 3);
    assert_eq!(result.generator_steps, 9);
}

#[test]
fn test_wasserstein_keeps_weights_clamped() {
    let dir = TempDir::new().unwrap();
    let cfg = TrainerConfig {
        weight_clip: ClipRange(-0.02, 0.02),
        ..config(Variant::Wasserstein, &dir)
    };
    let mut trainer = GanTrainer::new(model(ScoreActivation::Linear), mixture(), cfg).unwrap();
    let result = trainer.train().unwrap();
    assert_eq!(result.discriminator_steps, 5 * 6);
    assert_eq!(result.generator_steps, 6);

    for p in trainer.model().parameters().iter().filter(|p| p.name().is_some_and(|n| n.starts_with("d_"))) {
        assert!(p.to_vec().iter().all(|w| (-0.02..=0.02).contains(w)), "{:?}", p.name());
    }
}

#[test]
fn test_nan_aborts_with_divergence() {
    let dir = TempDir::new().unwrap();
    let mut trainer =
        GanTrainer::new(model(ScoreActivation::Sigmoid), NanData, config(Variant::Standard, &dir))
            .unwrap();
    let err = trainer.train().unwrap_err();
    match err {
        Error::Divergence { epoch, metric } => {
            assert_eq!(epoch, 0);
            assert_eq!(metric, "max_real_d");
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(trainer.state(), TrainerState::Aborted);
    assert_eq!(trainer.global_step(), 3);
}
