//! Matrix multiplication and bias broadcast for row-major matrices

use crate::autograd::{BackwardOp, Tensor};
use ndarray::{Array1, ArrayView2};
use std::rc::Rc;

/// Transpose a row-major `rows x cols` matrix
pub fn transpose(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = data[r * cols + c];
        }
    }
    out
}

/// Plain `(m x k) @ (k x n)` product on slices
pub fn matmul_compute(a: &[f32], b: &[f32], m: usize, k: usize, n: usize) -> Vec<f32> {
    match (ArrayView2::from_shape((m, k), a), ArrayView2::from_shape((k, n), b)) {
        (Ok(a), Ok(b)) => a.dot(&b).iter().copied().collect(),
        _ => panic!(
            "matmul dimension mismatch: a has {} elements for {m}x{k}, b has {} for {k}x{n}",
            a.len(),
            b.len()
        ),
    }
}

/// Matrix multiply `a (m x k)` by `b (k x n)`
pub fn matmul(a: &Tensor, b: &Tensor, m: usize, k: usize, n: usize) -> Tensor {
    let data = matmul_compute(&a.to_vec(), &b.to_vec(), m, k, n);
    let requires_grad = a.requires_grad() || b.requires_grad();

    let result = Tensor::from_vec(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(MatmulBackward { a: a.clone(), b: b.clone(), m, k, n }));
    }

    result
}

struct MatmulBackward {
    a: Tensor,
    b: Tensor,
    m: usize,
    k: usize,
    n: usize,
}

impl BackwardOp for MatmulBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        let grad = grad.to_vec();
        if self.a.requires_grad() {
            // ∂L/∂A = ∂L/∂C @ Bᵀ
            let b_t = transpose(&self.b.to_vec(), self.k, self.n);
            let grad_a = matmul_compute(&grad, &b_t, self.m, self.n, self.k);
            self.a.accumulate_grad(Array1::from(grad_a));
        }
        if self.b.requires_grad() {
            // ∂L/∂B = Aᵀ @ ∂L/∂C
            let a_t = transpose(&self.a.to_vec(), self.m, self.k);
            let grad_b = matmul_compute(&a_t, &grad, self.k, self.m, self.n);
            self.b.accumulate_grad(Array1::from(grad_b));
        }
    }
}

/// Add a length-`cols` bias to every row of a `rows x cols` matrix
pub fn add_bias(a: &Tensor, bias: &Tensor, rows: usize, cols: usize) -> Tensor {
    let data = {
        let a_data = a.data();
        let b_data = bias.data();
        let summed: Array1<f32> = (0..rows * cols).map(|i| a_data[i] + b_data[i % cols]).collect();
        summed
    };
    let requires_grad = a.requires_grad() || bias.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(AddBiasBackward {
            a: a.clone(),
            bias: bias.clone(),
            rows,
            cols,
        }));
    }

    result
}

struct AddBiasBackward {
    a: Tensor,
    bias: Tensor,
    rows: usize,
    cols: usize,
}

impl BackwardOp for AddBiasBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.bias.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            self.a.accumulate_grad(grad.clone());
        }
        if self.bias.requires_grad() {
            let mut grad_b = Array1::zeros(self.cols);
            for r in 0..self.rows {
                for c in 0..self.cols {
                    grad_b[c] += grad[r * self.cols + c];
                }
            }
            self.bias.accumulate_grad(grad_b);
        }
    }
}
