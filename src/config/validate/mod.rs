//! Configuration validation
//!
//! Validates GAN training configs before any model is built.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
