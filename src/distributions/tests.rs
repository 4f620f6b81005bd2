use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::autograd::{backward, mean, Tensor};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn test_flat_dims() {
    assert_eq!(Distribution::Categorical { dim: 10 }.dist_flat_dim(), 10);
    assert_eq!(Distribution::Uniform { dim: 2, fix_std: false }.dist_flat_dim(), 4);
    assert_eq!(Distribution::Uniform { dim: 2, fix_std: true }.dist_flat_dim(), 2);
    assert_eq!(Distribution::MeanBernoulli { dim: 3 }.dist_flat_dim(), 3);
}

#[test]
fn test_categorical_prior_is_one_hot() {
    let dist = Distribution::Categorical { dim: 4 };
    let x = dist.sample_prior(8, &mut rng());
    let values = x.to_vec();
    for row in values.chunks(4) {
        assert_abs_diff_eq!(row.iter().sum::<f32>(), 1.0);
        assert!(row.iter().all(|&v| v == 0.0 || v == 1.0));
    }
}

#[test]
fn test_uniform_prior_within_bounds() {
    let dist = Distribution::Uniform { dim: 3, fix_std: false };
    let x = dist.sample_prior(50, &mut rng());
    assert!(x.to_vec().iter().all(|&v| (-1.0..1.0).contains(&v)));
}

#[test]
fn test_categorical_prior_logli_is_log_uniform() {
    let dist = Distribution::Categorical { dim: 10 };
    let x = dist.sample_prior(5, &mut rng());
    let logli = dist.logli_prior(&x, 5).unwrap();
    for v in logli.to_vec() {
        assert_abs_diff_eq!(v, (0.1f32 + TINY).ln(), epsilon = 1e-6);
    }
}

#[test]
fn test_uniform_prior_logli_constant() {
    let dist = Distribution::Uniform { dim: 2, fix_std: false };
    let x = dist.sample_prior(3, &mut rng());
    let logli = dist.logli_prior(&x, 3).unwrap();
    for v in logli.to_vec() {
        assert_abs_diff_eq!(v, -2.0 * std::f32::consts::LN_2, epsilon = 1e-6);
    }
}

#[test]
fn test_uniform_prior_info_is_posterior_shaped() {
    let dist = Distribution::Uniform { dim: 1, fix_std: false };
    let info = dist.prior_dist_info(2);
    assert_eq!(info.require("mean").unwrap().to_vec(), vec![0.0, 0.0]);
    assert_eq!(info.require("stddev").unwrap().to_vec(), vec![1.0, 1.0]);

    // x = 0: N(0, 1) gives -ln(2π)/2, the prior density gives -ln 2
    let x = Tensor::from_vec(vec![0.0, 0.0], false);
    let posterior = dist.logli(&x, &info, 2).unwrap().to_vec();
    let prior = dist.logli_prior(&x, 2).unwrap().to_vec();
    let half_ln_2pi = 0.5 * (2.0 * std::f32::consts::PI).ln();
    for (p, q) in posterior.iter().zip(&prior) {
        assert_abs_diff_eq!(*p, -half_ln_2pi, epsilon = 1e-5);
        assert_abs_diff_eq!(*q, -std::f32::consts::LN_2, epsilon = 1e-6);
    }
}

#[test]
fn test_gaussian_logli_at_mean() {
    let dist = Distribution::Gaussian { dim: 1, fix_std: true };
    let x = Tensor::from_vec(vec![0.0], false);
    let logli = dist.logli_prior(&x, 1).unwrap();
    // log N(0; 0, 1) = -0.5 ln(2π)
    assert_abs_diff_eq!(logli.item(), -0.918_938_5, epsilon = 1e-5);
}

#[test]
fn test_activate_gaussian_exponentiates_log_variance() {
    let dist = Distribution::Gaussian { dim: 1, fix_std: false };
    // one row: mean 0.5, log-variance ln 4
    let flat = Tensor::from_vec(vec![0.5, 4.0f32.ln()], false);
    let info = dist.activate_dist(&flat, 1).unwrap();
    assert_abs_diff_eq!(info.require("mean").unwrap().item(), 0.5);
    assert_abs_diff_eq!(info.require("stddev").unwrap().item(), 2.0, epsilon = 1e-5);
}

#[test]
fn test_activate_categorical_rows_sum_to_one() {
    let dist = Distribution::Categorical { dim: 3 };
    let flat = Tensor::from_vec(vec![1.0, 2.0, 3.0, -1.0, 0.0, 1.0], false);
    let prob = dist.activate_dist(&flat, 2).unwrap().require("prob").unwrap().to_vec();
    assert_abs_diff_eq!(prob[..3].iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(prob[3..].iter().sum::<f32>(), 1.0, epsilon = 1e-6);
}

#[test]
fn test_logli_shape_mismatch_is_error() {
    let dist = Distribution::Categorical { dim: 3 };
    let x = Tensor::from_vec(vec![1.0, 0.0], false);
    assert!(dist.logli_prior(&x, 1).is_err());
}

#[test]
fn test_logli_gradient_reaches_posterior_params() {
    let dist = Distribution::Gaussian { dim: 2, fix_std: false };
    let flat = Tensor::from_vec(vec![0.1, -0.2, 0.0, 0.0], true);
    let info = dist.activate_dist(&flat, 1).unwrap();
    let x = Tensor::from_vec(vec![1.0, 1.0], false);
    let loss = mean(&dist.logli(&x, &info, 1).unwrap());
    backward(&loss, None);
    let grad = flat.grad().unwrap();
    // d logli / d mean = (x - mean) / σ² with σ = 1
    assert_abs_diff_eq!(grad[0], 0.9, epsilon = 1e-4);
    assert_abs_diff_eq!(grad[1], 1.2, epsilon = 1e-4);
}

#[test]
fn test_product_split_and_join_round_trip_keys() {
    let product = Product::new(vec![
        Distribution::Categorical { dim: 2 },
        Distribution::Uniform { dim: 1, fix_std: false },
    ]);
    let info = product.prior_dist_info(3);
    let keys: Vec<&str> = info.keys().collect();
    assert_eq!(keys, vec!["id_0_prob", "id_1_mean", "id_1_stddev"]);
    let parts = product.split_dist_info(&info).unwrap();
    assert_eq!(parts.len(), 2);
    assert!(parts[1].contains("stddev"));
    assert!(!parts[0].contains("stddev"));
}

#[test]
fn test_product_dims_and_sampling() {
    let product = Product::new(vec![
        Distribution::Gaussian { dim: 3, fix_std: true },
        Distribution::Categorical { dim: 4 },
    ]);
    assert_eq!(product.dim(), 7);
    assert_eq!(product.dist_flat_dim(), 7);
    let x = product.sample_prior(5, &mut rng());
    assert_eq!(x.len(), 35);
    let parts = product.split_var(&x, 5).unwrap();
    assert_eq!(parts[0].len(), 15);
    assert_eq!(parts[1].len(), 20);
}

#[test]
fn test_empty_product_logli_is_zero() {
    let product = Product::default();
    let x = Tensor::from_vec(vec![], false);
    let logli = product.logli_prior(&x, 4).unwrap();
    assert_eq!(logli.to_vec(), vec![0.0; 4]);
}

#[test]
fn test_distribution_serde_tagged() {
    let yaml = "kind: uniform\ndim: 2\n";
    let dist: Distribution = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(dist, Distribution::Uniform { dim: 2, fix_std: false });
}
