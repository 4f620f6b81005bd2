//! Dataset held in memory, cycled in shuffled passes

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

use super::{Batch, Dataset};
use crate::autograd::Tensor;
use crate::{Error, Result};

/// Rows are served in a random order; each full pass reshuffles.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    data: Vec<f32>,
    labels: Option<Vec<usize>>,
    dim: usize,
    order: Vec<usize>,
    cursor: usize,
    rng: StdRng,
}

impl InMemoryDataset {
    pub fn new(data: Vec<f32>, dim: usize, seed: u64) -> Result<Self> {
        if dim == 0 || data.is_empty() {
            return Err(Error::Config("dataset must contain at least one non-empty row".into()));
        }
        if data.len() % dim != 0 {
            return Err(Error::ShapeMismatch {
                expected: (data.len() / dim + 1) * dim,
                actual: data.len(),
            });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..data.len() / dim).collect();
        order.shuffle(&mut rng);
        Ok(Self { data, labels: None, dim, order, cursor: 0, rng })
    }

    /// Attach one label per row
    pub fn with_labels(mut self, labels: Vec<usize>) -> Result<Self> {
        if labels.len() != self.len() {
            return Err(Error::ShapeMismatch { expected: self.len(), actual: labels.len() });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    /// Load a JSON array of equally sized rows
    pub fn from_json_file(path: impl AsRef<Path>, seed: u64) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rows: Vec<Vec<f32>> = serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("invalid dataset file: {e}")))?;
        let dim = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != dim) {
            return Err(Error::ShapeMismatch { expected: dim, actual: bad.len() });
        }
        Self::new(rows.into_iter().flatten().collect(), dim, seed)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Dataset for InMemoryDataset {
    fn dim(&self) -> usize {
        self.dim
    }

    fn next_batch(&mut self, batch_size: usize) -> Result<Batch> {
        let mut values = Vec::with_capacity(batch_size * self.dim);
        let mut labels = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            if self.cursor == self.order.len() {
                self.order.shuffle(&mut self.rng);
                self.cursor = 0;
            }
            let row = self.order[self.cursor];
            self.cursor += 1;
            values.extend_from_slice(&self.data[row * self.dim..(row + 1) * self.dim]);
            if let Some(all) = &self.labels {
                labels.push(all[row]);
            }
        }
        let batch = Batch::new(Tensor::from_vec(values, false), batch_size, self.dim);
        Ok(if self.labels.is_some() { batch.with_labels(labels) } else { batch })
    }
}
