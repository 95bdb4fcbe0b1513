//! Digit-model collaborator.
//!
//! The window never looks inside the model; it only hands labeled samples
//! to whatever implements [`DigitModel`]. The production sink appends each
//! sample to a JSONL file so a trainer can pick them up later.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Samples are square, MNIST-shaped.
pub const SAMPLE_SIDE: u32 = 28;

/// One labeled drawing, downsampled to `SAMPLE_SIDE`² luma bytes
/// (row-major, ink is high).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DigitSample {
    pub label: u8,
    pub pixels: Vec<u8>,
}

pub trait DigitModel {
    fn train(&mut self, sample: DigitSample);
}

/// Appends every sample it receives to a JSONL file, one object per line.
pub struct SampleRecorder {
    path: PathBuf,
    recorded: usize,
}

impl SampleRecorder {
    pub fn new(path: PathBuf) -> Self {
        Self { path, recorded: 0 }
    }

    fn append(&self, sample: &DigitSample) -> Result<()> {
        let line = serde_json::to_string(sample)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl DigitModel for SampleRecorder {
    fn train(&mut self, sample: DigitSample) {
        match self.append(&sample) {
            Ok(()) => {
                self.recorded += 1;
                debug!(
                    "recorded sample #{} (label {}) to {}",
                    self.recorded,
                    sample.label,
                    self.path.display()
                );
            }
            Err(err) => warn!("could not record sample: {err:#}"),
        }
    }
}
