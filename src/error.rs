use std::{error::Error, fmt, io};

/// The summary module's result type.
pub type Result<T> = std::result::Result<T, SummaryErr>;

/// Failures while forwarding summaries to a sink.
#[derive(Debug)]
pub enum SummaryErr {
    MissingGradient { name: String, step: u64 },
    Sink(io::Error),
}

impl fmt::Display for SummaryErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryErr::MissingGradient { name, step } => write!(
                f,
                "parameter {name} has no gradient at step {step}, was the backward pass run?"
            ),
            SummaryErr::Sink(e) => write!(f, "sink error: {e}"),
        }
    }
}

impl Error for SummaryErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SummaryErr::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SummaryErr {
    fn from(value: io::Error) -> Self {
        Self::Sink(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<SummaryErr> for io::Error {
    fn from(value: SummaryErr) -> Self {
        match value {
            SummaryErr::Sink(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sink_error_keeps_its_kind_across_the_boundary() {
        let err = SummaryErr::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(err.source().is_some());

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn missing_gradient_becomes_invalid_data() {
        let err = SummaryErr::MissingGradient {
            name: "w1".into(),
            step: 7,
        };
        assert!(err.to_string().contains("w1"));
        assert!(err.to_string().contains("step 7"));

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
    }
}
