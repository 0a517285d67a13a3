use std::io;

use log::Level;

use super::SummarySink;

/// Forwards every record to the `log` facade.
///
/// Histograms are reduced to a short digest instead of dumping every value.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: Level,
}

impl LogSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl SummarySink for LogSink {
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()> {
        log::log!(self.level, "[step {step}] {tag}: {value}");
        Ok(())
    }

    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()> {
        log::log!(self.level, "[step {step}] {tag}: {}", digest(values));
        Ok(())
    }
}

/// Summarizes `values` as their length, extremes and mean.
fn digest(values: &[f32]) -> String {
    if values.is_empty() {
        return "empty".to_string();
    }

    let (min, max, sum) = values.iter().fold(
        (f32::INFINITY, f32::NEG_INFINITY, 0.0),
        |(min, max, sum), &x| (min.min(x), max.max(x), sum + x),
    );
    let mean = sum / values.len() as f32;

    format!("len={} min={min} max={max} mean={mean}", values.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn digest_summarizes_values() {
        assert_eq!(digest(&[1., -2., 4.]), "len=3 min=-2 max=4 mean=1");
    }

    #[test]
    fn digest_of_nothing() {
        assert_eq!(digest(&[]), "empty");
    }
}
