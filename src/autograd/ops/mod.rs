//! Autograd operations with backward passes
//!
//! This module provides differentiable operations for automatic differentiation.

mod activations;
mod basic;
mod elementwise;
mod matmul;
mod shape;

// Re-export all public operations
pub use activations::{leaky_relu, relu, sigmoid, sigmoid_scalar, softmax_rows, tanh};
pub use basic::{add, add_n, add_scalar, add_scaled, div, mean, mul, scale, sub, sum};
pub use elementwise::{exp, ln, sqrt, square};
pub use matmul::{add_bias, matmul, matmul_compute, transpose};
pub use shape::{concat_cols, slice_cols, sum_rows};
