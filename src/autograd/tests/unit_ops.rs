//! Unit tests for autograd operations (forward and backward)

use crate::autograd::{
    add, add_bias, add_n, backward, concat_cols, leaky_relu, ln, matmul, mean, mul, scale,
    sigmoid, slice_cols, sub, sum, sum_rows, Tensor,
};
use approx::assert_abs_diff_eq;

#[test]
fn test_tensor_creation() {
    let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
    assert_eq!(t.len(), 3);
    assert!(t.requires_grad());
    assert!(t.grad().is_none());
    assert!(t.name().is_none());
}

#[test]
fn test_parameter_is_named_and_trainable() {
    let p = Tensor::parameter("d_fc0_w", vec![0.5; 4]);
    assert_eq!(p.name(), Some("d_fc0_w"));
    assert!(p.requires_grad());
}

#[test]
fn test_tensor_grad_accumulation() {
    let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);

    t.accumulate_grad(ndarray::arr1(&[1.0, 1.0, 1.0]));
    let grad1 = t.grad().expect("gradient should be available");
    assert_eq!(grad1[0], 1.0);

    t.accumulate_grad(ndarray::arr1(&[1.0, 1.0, 1.0]));
    let grad2 = t.grad().expect("gradient should be available");
    assert_eq!(grad2[0], 2.0);

    t.zero_grad();
    assert!(t.grad().is_none());
}

#[test]
fn test_clone_shares_storage() {
    let a = Tensor::from_vec(vec![1.0, 2.0], true);
    let b = a.clone();
    b.data_mut()[0] = 7.0;
    assert_eq!(a.data()[0], 7.0);
    assert!(a.same_as(&b));
    assert!(!a.same_as(&a.detach()));
}

#[test]
fn test_add_backward() {
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
    let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], true);
    let c = add(&a, &b);

    assert_abs_diff_eq!(c.data()[2], 9.0);

    backward(&c, Some(ndarray::arr1(&[1.0, 1.0, 1.0])));

    assert_abs_diff_eq!(a.grad().expect("grad")[0], 1.0);
    assert_abs_diff_eq!(b.grad().expect("grad")[0], 1.0);
}

#[test]
fn test_sub_backward_negates_rhs() {
    let a = Tensor::from_vec(vec![3.0], true);
    let b = Tensor::from_vec(vec![1.0], true);
    let c = sub(&a, &b);
    assert_abs_diff_eq!(c.item(), 2.0);

    backward(&c, None);
    assert_abs_diff_eq!(a.grad().expect("grad")[0], 1.0);
    assert_abs_diff_eq!(b.grad().expect("grad")[0], -1.0);
}

#[test]
fn test_mul_backward() {
    let a = Tensor::from_vec(vec![2.0, 3.0], true);
    let b = Tensor::from_vec(vec![5.0, 7.0], true);
    let c = sum(&mul(&a, &b));
    backward(&c, None);

    let ga = a.grad().expect("grad");
    let gb = b.grad().expect("grad");
    assert_abs_diff_eq!(ga[0], 5.0);
    assert_abs_diff_eq!(ga[1], 7.0);
    assert_abs_diff_eq!(gb[0], 2.0);
    assert_abs_diff_eq!(gb[1], 3.0);
}

#[test]
fn test_shared_subexpression_gradient_counted_once_per_use() {
    // y = sum(x * x) with x shared: dy/dx = 2x
    let x = Tensor::from_vec(vec![1.5, -2.0], true);
    let h = scale(&x, 1.0);
    let y = sum(&mul(&h, &h));
    backward(&y, None);

    let g = x.grad().expect("grad");
    assert_abs_diff_eq!(g[0], 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(g[1], -4.0, epsilon = 1e-6);
}

#[test]
fn test_diamond_graph_accumulates_both_paths() {
    // y = mean(sigmoid(x)) + mean(x): dy/dx_i = (s(1-s) + 1) / n
    let x = Tensor::from_vec(vec![0.0, 0.0], true);
    let y = add(&mean(&sigmoid(&x)), &mean(&x));
    backward(&y, None);

    let g = x.grad().expect("grad");
    assert_abs_diff_eq!(g[0], (0.25 + 1.0) / 2.0, epsilon = 1e-6);
}

#[test]
fn test_mean_of_empty_is_zero() {
    let x = Tensor::from_vec(vec![], true);
    let m = mean(&x);
    assert_abs_diff_eq!(m.item(), 0.0);
}

#[test]
fn test_add_n() {
    let terms = vec![Tensor::scalar(1.0, false), Tensor::scalar(2.5, false)];
    assert_abs_diff_eq!(add_n(&terms).item(), 3.5);
    assert_abs_diff_eq!(add_n(&[]).item(), 0.0);
}

#[test]
fn test_matmul_forward() {
    // [1 2; 3 4] @ [5; 6] = [17; 39]
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], false);
    let b = Tensor::from_vec(vec![5.0, 6.0], false);
    let c = matmul(&a, &b, 2, 2, 1);
    assert_eq!(c.to_vec(), vec![17.0, 39.0]);
}

#[test]
fn test_add_bias_backward_sums_rows() {
    let a = Tensor::from_vec(vec![0.0; 6], false);
    let bias = Tensor::from_vec(vec![1.0, 2.0], true);
    let c = add_bias(&a, &bias, 3, 2);
    assert_eq!(c.to_vec(), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);

    backward(&sum(&c), None);
    let g = bias.grad().expect("grad");
    assert_abs_diff_eq!(g[0], 3.0);
    assert_abs_diff_eq!(g[1], 3.0);
}

#[test]
fn test_slice_and_concat_cols() {
    // 2 x 3 matrix
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], true);
    let left = slice_cols(&a, 2, 3, 0, 1);
    let right = slice_cols(&a, 2, 3, 1, 3);
    assert_eq!(left.to_vec(), vec![1.0, 4.0]);
    assert_eq!(right.to_vec(), vec![2.0, 3.0, 5.0, 6.0]);

    let joined = concat_cols(&[(left, 1), (right, 2)], 2);
    assert_eq!(joined.to_vec(), a.to_vec());

    backward(&sum(&joined), None);
    assert_eq!(a.grad().expect("grad").to_vec(), vec![1.0; 6]);
}

#[test]
fn test_sum_rows() {
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], true);
    let s = sum_rows(&a, 2, 2);
    assert_eq!(s.to_vec(), vec![3.0, 7.0]);
}

#[test]
fn test_leaky_relu_slope() {
    let a = Tensor::from_vec(vec![-2.0, 3.0], true);
    let y = leaky_relu(&a, 0.1);
    assert_abs_diff_eq!(y.data()[0], -0.2, epsilon = 1e-6);
    backward(&sum(&y), None);
    let g = a.grad().expect("grad");
    assert_abs_diff_eq!(g[0], 0.1, epsilon = 1e-6);
    assert_abs_diff_eq!(g[1], 1.0, epsilon = 1e-6);
}

#[test]
fn test_ln_backward() {
    let a = Tensor::from_vec(vec![2.0], true);
    backward(&ln(&a), None);
    assert_abs_diff_eq!(a.grad().expect("grad")[0], 0.5, epsilon = 1e-6);
}

#[test]
fn test_constant_graph_has_no_backward_op() {
    let a = Tensor::from_vec(vec![1.0], false);
    let b = add(&a, &a);
    assert!(b.backward_op().is_none());
    assert!(!b.requires_grad());
}

#[test]
fn test_min_max_propagate_nan() {
    let t = Tensor::from_vec(vec![1.0, f32::NAN, 3.0], false);
    assert!(t.max().is_nan());
    assert!(t.min().is_nan());
    let t = Tensor::from_vec(vec![1.0, -4.0, 3.0], false);
    assert_abs_diff_eq!(t.max(), 3.0);
    assert_abs_diff_eq!(t.min(), -4.0);
}
