//! Per-epoch metric accumulation

use crate::{Error, Result};

/// Logged rows of one epoch, one value per registered key
#[derive(Debug, Clone)]
pub struct LogRecord {
    keys: Vec<String>,
    rows: Vec<Vec<f32>>,
}

impl LogRecord {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, rows: Vec::new() }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Record one logged step
    pub fn push(&mut self, values: Vec<f32>) -> Result<()> {
        if values.len() != self.keys.len() {
            return Err(Error::ShapeMismatch { expected: self.keys.len(), actual: values.len() });
        }
        self.rows.push(values);
        Ok(())
    }

    /// Number of logged steps
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Arithmetic mean per key; NaN when nothing was logged
    pub fn means(&self) -> Vec<f32> {
        let n = self.rows.len() as f64;
        (0..self.keys.len())
            .map(|k| {
                if self.rows.is_empty() {
                    return f32::NAN;
                }
                let total: f64 = self.rows.iter().map(|row| f64::from(row[k])).sum();
                (total / n) as f32
            })
            .collect()
    }

    /// Reduce to the epoch summary and start over
    pub fn finish_epoch(&mut self, epoch: usize) -> EpochLog {
        let means = self.means();
        self.rows.clear();
        EpochLog { epoch, keys: self.keys.clone(), means }
    }
}

/// Mean of every metric over one epoch
#[derive(Debug, Clone, PartialEq)]
pub struct EpochLog {
    pub epoch: usize,
    pub keys: Vec<String>,
    pub means: Vec<f32>,
}

impl EpochLog {
    /// `Epoch N | k: v; k: v`
    pub fn line(&self) -> String {
        let body = self
            .keys
            .iter()
            .zip(&self.means)
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        format!("Epoch {} | {body}", self.epoch)
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.keys.iter().position(|k| k == key).map(|i| self.means[i])
    }

    /// First metric whose mean is NaN
    pub fn first_nan(&self) -> Option<&str> {
        self.keys.iter().zip(&self.means).find(|(_, v)| v.is_nan()).map(|(k, _)| k.as_str())
    }
}
