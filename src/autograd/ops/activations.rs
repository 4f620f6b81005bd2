//! Activation functions: relu, leaky_relu, sigmoid, tanh, softmax_rows

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// Element-wise op whose derivative is a function of (input, output)
struct PointwiseBackward {
    a: Tensor,
    output: Array1<f32>,
    derivative: fn(f32, f32, f32) -> f32,
    param: f32,
}

impl BackwardOp for PointwiseBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            let input = self.a.data();
            let grad_a: Array1<f32> = grad
                .iter()
                .zip(input.iter())
                .zip(self.output.iter())
                .map(|((&g, &x), &y)| g * (self.derivative)(x, y, self.param))
                .collect();
            self.a.accumulate_grad(grad_a);
        }
    }
}

/// Apply an element-wise function, recording its derivative
pub(crate) fn pointwise(
    a: &Tensor,
    forward: impl Fn(f32) -> f32,
    derivative: fn(f32, f32, f32) -> f32,
    param: f32,
) -> Tensor {
    let data: Array1<f32> = a.data().mapv(forward);
    let requires_grad = a.requires_grad();

    let result = Tensor::new(data.clone(), requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(PointwiseBackward {
            a: a.clone(),
            output: data,
            derivative,
            param,
        }));
    }

    result
}

/// ReLU activation
pub fn relu(a: &Tensor) -> Tensor {
    pointwise(a, |x| x.max(0.0), |x, _, _| if x > 0.0 { 1.0 } else { 0.0 }, 0.0)
}

/// Leaky ReLU with the given negative slope
pub fn leaky_relu(a: &Tensor, slope: f32) -> Tensor {
    pointwise(
        a,
        move |x| if x > 0.0 { x } else { slope * x },
        |x, _, s| if x > 0.0 { 1.0 } else { s },
        slope,
    )
}

/// Logistic sigmoid
pub fn sigmoid(a: &Tensor) -> Tensor {
    pointwise(a, sigmoid_scalar, |_, y, _| y * (1.0 - y), 0.0)
}

/// Hyperbolic tangent
pub fn tanh(a: &Tensor) -> Tensor {
    pointwise(a, f32::tanh, |_, y, _| 1.0 - y * y, 0.0)
}

/// Numerically stable scalar sigmoid
pub fn sigmoid_scalar(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Row-wise softmax over a `rows x cols` matrix
pub fn softmax_rows(a: &Tensor, rows: usize, cols: usize) -> Tensor {
    let input = a.data();
    let mut out = Array1::zeros(rows * cols);
    for r in 0..rows {
        let row = input.slice(ndarray::s![r * cols..(r + 1) * cols]);
        let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = row.iter().map(|&v| (v - max).exp()).collect();
        let total: f32 = exps.iter().sum();
        for (c, e) in exps.into_iter().enumerate() {
            out[r * cols + c] = e / total;
        }
    }
    drop(input);

    let requires_grad = a.requires_grad();
    let result = Tensor::new(out.clone(), requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(SoftmaxRowsBackward {
            a: a.clone(),
            output: out,
            rows,
            cols,
        }));
    }

    result
}

struct SoftmaxRowsBackward {
    a: Tensor,
    output: Array1<f32>,
    rows: usize,
    cols: usize,
}

impl BackwardOp for SoftmaxRowsBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if !self.a.requires_grad() {
            return;
        }
        // ∂L/∂x_i = y_i * (g_i - Σ_j g_j y_j), per row
        let mut grad_a = Array1::zeros(self.rows * self.cols);
        for r in 0..self.rows {
            let base = r * self.cols;
            let dot: f32 =
                (0..self.cols).map(|c| grad[base + c] * self.output[base + c]).sum();
            for c in 0..self.cols {
                grad_a[base + c] = self.output[base + c] * (grad[base + c] - dot);
            }
        }
        self.a.accumulate_grad(grad_a);
    }
}
