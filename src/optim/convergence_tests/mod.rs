//! Optimizer convergence tests
//!
//! Each optimizer is run on small analytic objectives where the gradient is
//! known in closed form.

mod helpers;
mod optimizer_tests;
