//! Column slicing, column concatenation and row reductions

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// Columns `start..end` of a `rows x cols` matrix
pub fn slice_cols(a: &Tensor, rows: usize, cols: usize, start: usize, end: usize) -> Tensor {
    assert!(start <= end && end <= cols, "column range {start}..{end} out of bounds for {cols}");
    let width = end - start;
    let data: Array1<f32> = {
        let input = a.data();
        (0..rows)
            .flat_map(|r| (start..end).map(move |c| r * cols + c))
            .map(|i| input[i])
            .collect::<Array1<f32>>()
    };
    let requires_grad = a.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(SliceColsBackward { a: a.clone(), rows, cols, start, width }));
    }

    result
}

struct SliceColsBackward {
    a: Tensor,
    rows: usize,
    cols: usize,
    start: usize,
    width: usize,
}

impl BackwardOp for SliceColsBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            let mut grad_a = Array1::zeros(self.rows * self.cols);
            for r in 0..self.rows {
                for c in 0..self.width {
                    grad_a[r * self.cols + self.start + c] = grad[r * self.width + c];
                }
            }
            self.a.accumulate_grad(grad_a);
        }
    }
}

/// Concatenate `rows x widths[i]` matrices side by side
pub fn concat_cols(parts: &[(Tensor, usize)], rows: usize) -> Tensor {
    let total: usize = parts.iter().map(|(_, w)| *w).sum();
    let mut data = Array1::zeros(rows * total);
    let mut offset = 0;
    for (part, width) in parts {
        let values = part.data();
        for r in 0..rows {
            for c in 0..*width {
                data[r * total + offset + c] = values[r * width + c];
            }
        }
        offset += width;
    }
    let requires_grad = parts.iter().any(|(t, _)| t.requires_grad());

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(ConcatColsBackward { parts: parts.to_vec(), rows, total }));
    }

    result
}

struct ConcatColsBackward {
    parts: Vec<(Tensor, usize)>,
    rows: usize,
    total: usize,
}

impl BackwardOp for ConcatColsBackward {
    fn inputs(&self) -> Vec<Tensor> {
        self.parts.iter().map(|(t, _)| t.clone()).collect()
    }

    fn backward(&self, grad: &Array1<f32>) {
        let mut offset = 0;
        for (part, width) in &self.parts {
            if part.requires_grad() {
                let mut grad_p = Array1::zeros(self.rows * width);
                for r in 0..self.rows {
                    for c in 0..*width {
                        grad_p[r * width + c] = grad[r * self.total + offset + c];
                    }
                }
                part.accumulate_grad(grad_p);
            }
            offset += width;
        }
    }
}

/// Sum each row of a `rows x cols` matrix, giving a length-`rows` vector
pub fn sum_rows(a: &Tensor, rows: usize, cols: usize) -> Tensor {
    let data: Array1<f32> = {
        let input = a.data();
        (0..rows)
            .map(|r| (0..cols).map(|c| input[r * cols + c]).sum::<f32>())
            .collect::<Array1<f32>>()
    };
    let requires_grad = a.requires_grad();

    let result = Tensor::new(data, requires_grad);

    if requires_grad {
        result.set_backward_op(Rc::new(SumRowsBackward { a: a.clone(), rows, cols }));
    }

    result
}

struct SumRowsBackward {
    a: Tensor,
    rows: usize,
    cols: usize,
}

impl BackwardOp for SumRowsBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Array1<f32>) {
        if self.a.requires_grad() {
            let grad_a: Array1<f32> =
                (0..self.rows * self.cols).map(|i| grad[i / self.cols]).collect();
            self.a.accumulate_grad(grad_a);
        }
    }
}
