//! Basic autograd operations: add, sub, mul, div, scale, sum, mean

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// Add two tensors element-wise
pub fn add(a: &Tensor, b: &Tensor) -> Tensor {
    let data = &*a.data() + &*b.data();
    let requires_grad = a.requires_grad() || b.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(AddBackward { a: a.clone(), b: b.clone(), b_sign: 1.0 }));
    }

    result
}

/// Subtract `b` from `a` element-wise
pub fn sub(a: &Tensor, b: &Tensor) -> Tensor {
    let data = &*a.data() - &*b.data();
    let requires_grad = a.requires_grad() || b.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(AddBackward { a: a.clone(), b: b.clone(), b_sign: -1.0 }));
    }

    result
}

struct AddBackward {
    a: Tensor,
    b: Tensor,
    b_sign: f32,
}

impl BackwardOp for AddBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            self.a.accumulate_grad(grad.clone());
        }
        if self.b.requires_grad() {
            self.b.accumulate_grad(grad * self.b_sign);
        }
    }
}

/// Multiply two tensors element-wise
pub fn mul(a: &Tensor, b: &Tensor) -> Tensor {
    let data = &*a.data() * &*b.data();
    let requires_grad = a.requires_grad() || b.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(MulBackward { a: a.clone(), b: b.clone() }));
    }

    result
}

struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            // ∂L/∂a = ∂L/∂out * b
            self.a.accumulate_grad(grad * &*self.b.data());
        }
        if self.b.requires_grad() {
            // ∂L/∂b = ∂L/∂out * a
            self.b.accumulate_grad(grad * &*self.a.data());
        }
    }
}

/// Divide `a` by `b` element-wise
pub fn div(a: &Tensor, b: &Tensor) -> Tensor {
    let data = &*a.data() / &*b.data();
    let requires_grad = a.requires_grad() || b.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(DivBackward { a: a.clone(), b: b.clone() }));
    }

    result
}

struct DivBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for DivBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        let b = self.b.data();
        if self.a.requires_grad() {
            // ∂L/∂a = ∂L/∂out / b
            self.a.accumulate_grad(grad / &*b);
        }
        if self.b.requires_grad() {
            // ∂L/∂b = -∂L/∂out * a / b²
            let a = self.a.data();
            let grad_b = -(grad * &*a) / &(&*b * &*b);
            self.b.accumulate_grad(grad_b);
        }
    }
}

/// Scale tensor by a scalar
pub fn scale(a: &Tensor, factor: f32) -> Tensor {
    let data = &*a.data() * factor;
    let requires_grad = a.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(ScaleBackward { a: a.clone(), factor }));
    }

    result
}

struct ScaleBackward {
    a: Tensor,
    factor: f32,
}

impl BackwardOp for ScaleBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            self.a.accumulate_grad(grad * self.factor);
        }
    }
}

/// Add a constant to every element
pub fn add_scalar(a: &Tensor, value: f32) -> Tensor {
    let data = &*a.data() + value;
    let requires_grad = a.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(ScaleBackward { a: a.clone(), factor: 1.0 }));
    }

    result
}

/// `a + factor * b`, used to fold a weighted regularizer into a loss
pub fn add_scaled(a: &Tensor, b: &Tensor, factor: f32) -> Tensor {
    add(a, &scale(b, factor))
}

/// Sum all elements
pub fn sum(a: &Tensor) -> Tensor {
    let data = Array1::from(vec![a.data().sum()]);
    let requires_grad = a.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(SumBackward { a: a.clone(), factor: 1.0 }));
    }

    result
}

/// Arithmetic mean of all elements
///
/// The mean of an empty tensor is 0 with no gradient contribution.
pub fn mean(a: &Tensor) -> Tensor {
    let n = a.len();
    let total = a.data().sum();
    let value = if n == 0 { 0.0 } else { total / n as f32 };
    let requires_grad = a.requires_grad();

    let result = Tensor::new(Array1::from(vec![value]), requires_grad);

    if requires_grad {
        let factor = if n == 0 { 0.0 } else { 1.0 / n as f32 };
        result.set_backward_op(Rc::new(SumBackward { a: a.clone(), factor }));
    }

    result
}

struct SumBackward {
    a: Tensor,
    factor: f32,
}

impl BackwardOp for SumBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            // ∂L/∂a = ∂L/∂sum * factor (broadcast)
            let grad_a = Array1::from_elem(self.a.len(), grad[0] * self.factor);
            self.a.accumulate_grad(grad_a);
        }
    }
}

/// Sum a list of scalar terms into one scalar
///
/// An empty list yields a constant zero.
pub fn add_n(terms: &[Tensor]) -> Tensor {
    let mut iter = terms.iter();
    let Some(first) = iter.next() else {
        return Tensor::scalar(0.0, false);
    };
    iter.fold(first.clone(), |acc, t| add(&acc, t))
}
