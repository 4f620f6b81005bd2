//! Real-data sources for the discriminator

mod memory;
mod mixture;

pub use memory::InMemoryDataset;
pub use mixture::GaussianMixture;

use crate::autograd::Tensor;
use crate::Result;

/// A batch of real data, row-major `rows x cols`
#[derive(Debug, Clone)]
pub struct Batch {
    /// Input features
    pub inputs: Tensor,
    /// Labels, if the source has any; the trainer ignores them
    pub labels: Option<Vec<usize>>,
    pub rows: usize,
    pub cols: usize,
}

impl Batch {
    pub fn new(inputs: Tensor, rows: usize, cols: usize) -> Self {
        Self { inputs, labels: None, rows, cols }
    }

    pub fn with_labels(mut self, labels: Vec<usize>) -> Self {
        self.labels = Some(labels);
        self
    }
}

/// An endless source of real batches
pub trait Dataset {
    /// Width of one row
    fn dim(&self) -> usize;

    /// Draw the next `batch_size` rows
    fn next_batch(&mut self, batch_size: usize) -> Result<Batch>;
}

impl<D: Dataset + ?Sized> Dataset for Box<D> {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn next_batch(&mut self, batch_size: usize) -> Result<Batch> {
        (**self).next_batch(batch_size)
    }
}
