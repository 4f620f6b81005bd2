//! Property-based tests for dense layers built from matmul and add_bias

use super::test_utils::{assert_grads_close, numeric_gradient};
use crate::autograd::{add_bias, backward, matmul, Tensor};
use proptest::prelude::*;

/// Weighted sum of `x W + b`
fn layer_objective(x: &[f32], weight: &[f32], bias: &[f32], m: usize, k: usize, n: usize) -> f32 {
    let y = add_bias(
        &matmul(&Tensor::from_vec(x.to_vec(), false), &Tensor::from_vec(weight.to_vec(), false), m, k, n),
        &Tensor::from_vec(bias.to_vec(), false),
        m,
        n,
    );
    let data = y.data();
    data.iter().enumerate().map(|(i, v)| v * output_weight(i)).sum()
}

fn grad_of(t: &Tensor) -> Vec<f32> {
    t.grad().map(|g| g.to_vec()).unwrap_or_else(|| vec![0.0; t.len()])
}

fn output_weight(i: usize) -> f32 {
    [1.0, -0.5, 2.0][i % 3]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_dense_layer_gradients(
        m in 1usize..4,
        k in 1usize..4,
        n in 1usize..4,
        pool in prop::collection::vec(-2.0f32..2.0, 40),
    ) {
        let x = pool[..m * k].to_vec();
        let weight = pool[12..12 + k * n].to_vec();
        let bias = pool[24..24 + n].to_vec();

        let tx = Tensor::from_vec(x.clone(), true);
        let tw = Tensor::from_vec(weight.clone(), true);
        let tb = Tensor::from_vec(bias.clone(), true);
        let y = add_bias(&matmul(&tx, &tw, m, k, n), &tb, m, n);
        let seed: Vec<f32> = (0..m * n).map(output_weight).collect();
        backward(&y, Some(ndarray::Array1::from(seed)));

        let dx = numeric_gradient(|v| layer_objective(v, &weight, &bias, m, k, n), &x);
        assert_grads_close(&grad_of(&tx), &dx, 0.05)?;
        let dw = numeric_gradient(|v| layer_objective(&x, v, &bias, m, k, n), &weight);
        assert_grads_close(&grad_of(&tw), &dw, 0.05)?;
        let db = numeric_gradient(|v| layer_objective(&x, &weight, v, m, k, n), &bias);
        assert_grads_close(&grad_of(&tb), &db, 0.05)?;
    }

    #[test]
    fn prop_matmul_output_len(m in 1usize..10, k in 1usize..10, n in 1usize..10) {
        let c = matmul(
            &Tensor::from_vec(vec![1.0; m * k], false),
            &Tensor::from_vec(vec![1.0; k * n], false),
            m,
            k,
            n,
        );
        prop_assert_eq!(c.len(), m * n);
        // all-ones operands give k in every cell
        prop_assert!(c.data().iter().all(|v| *v == k as f32));
    }
}
