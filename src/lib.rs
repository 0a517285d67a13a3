//! Forwards the state of a training loop to a metrics sink.
//!
//! A training step is recorded as its loss plus the values and gradient of every named
//! parameter, a validation pass as its loss and accuracy. Records are tagged with fixed strings
//! and the step given by the caller, nothing is counted nor buffered here.

pub mod error;
pub mod param;
pub mod recorder;
pub mod sink;

pub use error::{Result, SummaryErr};
pub use param::{NamedParam, NamedParameters};
pub use recorder::{record_training, record_validation};
pub use sink::{JsonLinesSink, LogSink, MemorySink, Record, SummarySink, TensorBoardSink};
