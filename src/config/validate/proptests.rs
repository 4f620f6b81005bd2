//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::tests::create_valid_spec;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::gan::{ClipRange, OptimizerSpec};
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = GanSpec> {
    (
        1usize..256,                        // batch_size
        1usize..100,                        // max_epoch
        1usize..1000,                       // snapshot_interval
        1e-6f32..1.0,                       // discriminator lr
        proptest::option::of(0.01f32..5.0), // grad clip half-width
    )
        .prop_map(|(batch_size, max_epoch, snapshot_interval, lr, clip)| {
            let mut spec = create_valid_spec();
            spec.training = TrainingParams {
                batch_size,
                max_epoch,
                snapshot_interval,
                discriminator_grad_clip: clip.map(|c| ClipRange(-c, c)),
                ..Default::default()
            };
            spec.optimizer.discriminator = Some(OptimizerSpec::adam(lr, 0.5));
            spec
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.batch_size = 0;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_lr_above_one_fails(spec in arb_valid_spec(), high_lr in 1.01f32..10.0) {
        let mut spec = spec;
        spec.optimizer.discriminator = Some(OptimizerSpec::rmsprop(high_lr));
        prop_assert!(
            matches!(
                validate_config(&spec),
                Err(ValidationError::InvalidLearningRate { .. })
            ),
            "unexpected validation result"
        );
    }

    #[test]
    fn prop_reversed_weight_clip_fails(spec in arb_valid_spec(), lo in 0.01f32..1.0, gap in 0.01f32..1.0) {
        let mut spec = spec;
        spec.training.weight_clip = ClipRange(lo, lo - gap);
        prop_assert!(
            matches!(
                validate_config(&spec),
                Err(ValidationError::InvalidClipRange { name: "weight_clip", .. })
            ),
            "unexpected validation result"
        );
    }
}
