//! Tests for autograd operations with gradient checking

mod prop_matmul;
mod unit_ops;
