//! Convergence properties of Adam, RMSProp and SGD

use super::helpers::{step_with_idle_parameter, Bowl};
use crate::optim::*;
use proptest::prelude::*;

const START: [f32; 4] = [3.0, -2.0, 1.5, -2.5];

proptest! {
    #[test]
    fn prop_adam_reaches_origin(lr in 0.05f32..0.5) {
        let (x, _) = Bowl::isotropic(4).descend(&mut Adam::default_params(lr), &START, 100);
        prop_assert!(x.to_vec().iter().all(|v| v.abs() < 1.5));
    }

    #[test]
    fn prop_adam_gan_betas_make_progress(lr in 0.01f32..0.1) {
        let bowl = Bowl { curvature: vec![1.0] };
        let (_, losses) = bowl.descend(&mut Adam::new(lr, 0.5, 0.999, 1e-8), &[10.0], 30);
        prop_assert!(losses[29] < 100.0);
    }

    #[test]
    fn prop_rmsprop_reaches_origin(lr in 0.02f32..0.1) {
        let (x, _) = Bowl::isotropic(4).descend(&mut RMSProp::default_params(lr), &START, 300);
        prop_assert!(x.to_vec().iter().all(|v| v.abs() < 0.5));
    }

    #[test]
    fn prop_sgd_loss_monotone(lr in 0.01f32..0.4) {
        let bowl = Bowl { curvature: vec![1.0] };
        let (_, losses) = bowl.descend(&mut SGD::new(lr, 0.0), &[10.0], 50);
        prop_assert!(losses.windows(2).all(|w| w[1] <= w[0] + 1e-3));
    }
}

#[test]
fn test_idle_parameter_untouched() {
    let optimizers: Vec<Box<dyn Optimizer>> = vec![
        Box::new(Adam::new(1e-3, 0.5, 0.999, 1e-8)),
        Box::new(RMSProp::default_params(5e-5)),
        Box::new(SGD::new(0.1, 0.9)),
    ];
    for mut optimizer in optimizers {
        let idle = step_with_idle_parameter(optimizer.as_mut(), 20);
        assert_eq!(idle.to_bits(), 0.25f32.to_bits(), "{}", optimizer.name());
    }
}

#[test]
fn test_anisotropic_bowl_with_sgd() {
    let bowl = Bowl { curvature: vec![1.0, 4.0] };
    let (x, losses) = bowl.descend(&mut SGD::new(0.05, 0.0), &[1.0, 1.0], 200);
    assert!(losses.last().copied().unwrap_or(f32::INFINITY) < 1e-6);
    assert!(x.to_vec().iter().all(|v| v.abs() < 1e-3));
}
