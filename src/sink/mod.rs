mod float;
mod json;
mod logger;
mod memory;
mod tensorboard;

use std::io;

use serde::{Deserialize, Serialize};

pub use json::JsonLinesSink;
pub use logger::LogSink;
pub use memory::MemorySink;
pub use tensorboard::TensorBoardSink;

/// A single summary as received by a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    Scalar {
        tag: String,
        #[serde(with = "float::scalar")]
        value: f32,
        step: u64,
    },
    Histogram {
        tag: String,
        #[serde(with = "float::seq")]
        values: Vec<f32>,
        step: u64,
    },
}

impl Record {
    /// Returns the record's tag.
    pub fn tag(&self) -> &str {
        match self {
            Record::Scalar { tag, .. } | Record::Histogram { tag, .. } => tag,
        }
    }

    /// Returns the step the record was emitted at.
    pub fn step(&self) -> u64 {
        match self {
            Record::Scalar { step, .. } | Record::Histogram { step, .. } => *step,
        }
    }
}

/// A metrics backend capable of receiving scalars and histograms.
///
/// How the records get persisted or transmitted is entirely up to the
/// implementor. The recorders never flush nor close a sink, the caller owns
/// its lifecycle.
pub trait SummarySink {
    /// Writes a single named value at `step`.
    ///
    /// # Arguments
    /// * `tag` - The record's name.
    /// * `value` - The value to record.
    /// * `step` - The position of the record on the training time axis.
    ///
    /// # Errors
    /// Whatever the underlying backend fails with.
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()>;

    /// Writes a named array of values at `step`, meant for distribution plots.
    ///
    /// # Arguments
    /// * `tag` - The record's name.
    /// * `values` - The values to record.
    /// * `step` - The position of the record on the training time axis.
    ///
    /// # Errors
    /// Whatever the underlying backend fails with.
    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()>;

    /// Pushes any pending records down to the backend.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: SummarySink + ?Sized> SummarySink for &mut S {
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()> {
        (**self).add_scalar(tag, value, step)
    }

    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()> {
        (**self).add_histogram(tag, values, step)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S: SummarySink + ?Sized> SummarySink for Box<S> {
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()> {
        (**self).add_scalar(tag, value, step)
    }

    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()> {
        (**self).add_histogram(tag, values, step)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
