//! Named distribution parameters

use crate::autograd::Tensor;
use crate::{Error, Result};

/// Guards every `ln` against a zero argument
pub const TINY: f32 = 1e-8;

/// Ordered map from parameter name (`prob`, `mean`, `stddev`, `p`) to tensor.
///
/// A product distribution prefixes each component's keys with `id_{i}_` so
/// that the joined info can be split back apart.
#[derive(Debug, Clone, Default)]
pub struct DistInfo {
    entries: Vec<(String, Tensor)>,
}

impl DistInfo {
    /// Empty info
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Tensor) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: Tensor) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&Tensor> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a parameter the caller cannot do without
    pub fn require(&self, key: &str) -> Result<&Tensor> {
        self.get(key).ok_or_else(|| Error::Config(format!("distribution info is missing '{key}'")))
    }

    /// Whether the parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parameter names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tensor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
