//! Append-only JSONL summary stream

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const EVENTS_FILE: &str = "events.jsonl";

/// Grayscale image payload, row-major in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub height: usize,
    pub width: usize,
    /// Number of images packed in `pixels`
    pub count: usize,
    pub pixels: Vec<f32>,
}

/// Value carried by a summary record
///
/// JSON has no NaN or infinity, so non-finite scalars are written as the
/// strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryValue {
    Scalar(#[serde(with = "scalar_repr")] f32),
    Image(ImageSummary),
}

mod scalar_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f32),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f32(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f32::NAN),
                "inf" => Ok(f32::INFINITY),
                "-inf" => Ok(f32::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!("invalid scalar '{other}'"))),
            },
        }
    }
}

/// One line of the summary stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub step: usize,
    /// Seconds since the Unix epoch
    pub wall_time: f64,
    pub tag: String,
    #[serde(flatten)]
    pub value: SummaryValue,
}

/// Writes [`SummaryRecord`]s to `{dir}/events.jsonl`
pub struct SummaryWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl SummaryWriter {
    /// Create the directory if needed and open the stream for appending
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::Summary(format!("cannot create {}: {e}", dir.display())))?;
        let path = dir.join(EVENTS_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::Summary(format!("cannot open {}: {e}", path.display())))?;
        Ok(Self { path, out: BufWriter::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one scalar per `(tag, value)` at `step`
    pub fn write_scalars<'a>(
        &mut self,
        step: usize,
        scalars: impl IntoIterator<Item = (&'a str, f32)>,
    ) -> Result<()> {
        let wall_time = wall_time();
        for (tag, value) in scalars {
            self.write_record(&SummaryRecord {
                step,
                wall_time,
                tag: tag.to_string(),
                value: SummaryValue::Scalar(value),
            })?;
        }
        self.flush()
    }

    pub fn write_image(&mut self, step: usize, tag: &str, image: ImageSummary) -> Result<()> {
        self.write_record(&SummaryRecord {
            step,
            wall_time: wall_time(),
            tag: tag.to_string(),
            value: SummaryValue::Image(image),
        })?;
        self.flush()
    }

    fn write_record(&mut self, record: &SummaryRecord) -> Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| Error::Serialization(format!("summary record: {e}")))?;
        writeln!(self.out, "{line}")
            .map_err(|e| Error::Summary(format!("write to {} failed: {e}", self.path.display())))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out
            .flush()
            .map_err(|e| Error::Summary(format!("flush of {} failed: {e}", self.path.display())))
    }
}

/// Read back every record of a stream
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<SummaryRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|e| Error::Serialization(format!("summary record: {e}")))?;
        records.push(record);
    }
    Ok(records)
}

fn wall_time() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
