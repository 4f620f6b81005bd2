//! Tape-based autograd engine
//!
//! Every differentiable op records a [`BackwardOp`] on its output. Calling
//! [`backward`] on a scalar loss walks the recorded graph in reverse
//! topological order so that each op runs exactly once, even when a
//! sub-expression (for instance a generated batch that feeds both the score
//! head and the latent posterior head) is shared by several consumers.

mod backward;
mod ops;
mod tensor;

#[cfg(test)]
mod tests;

pub use backward::BackwardOp;
pub use ops::*;
pub use tensor::Tensor;

use ndarray::Array1;
use std::collections::HashSet;

/// Perform backward pass on a tensor
///
/// Without an explicit `grad_output` the tensor is seeded with ones, which is
/// the usual case for a scalar loss.
pub fn backward(tensor: &Tensor, grad_output: Option<Array1<f32>>) {
    let seed = grad_output.unwrap_or_else(|| Array1::ones(tensor.len()));
    tensor.set_grad(seed);

    for node in topological_order(tensor).iter().rev() {
        let Some(op) = node.backward_op() else {
            continue;
        };
        if let Some(grad) = node.grad() {
            op.backward(&grad);
        }
    }
}

/// Nodes reachable from `root`, every node listed after all of its inputs
fn topological_order(root: &Tensor) -> Vec<Tensor> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    // (node, inputs already expanded)
    let mut stack = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        stack.push((node.clone(), true));
        if let Some(op) = node.backward_op() {
            for input in op.inputs() {
                if !visited.contains(&input.id()) {
                    stack.push((input, false));
                }
            }
        }
    }

    order
}
