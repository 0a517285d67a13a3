use std::{fs, io, path::Path};

use log::warn;
use tensorboard_rs::summary_writer::SummaryWriter;

use super::SummarySink;

/// Amount of equal width buckets a histogram is split into.
const BUCKETS: usize = 30;

/// Writes records into a TensorBoard event file under a log directory.
pub struct TensorBoardSink {
    writer: SummaryWriter,
}

/// Summary statistics TensorBoard expects for a histogram.
#[derive(Debug, PartialEq)]
struct Distribution {
    min: f64,
    max: f64,
    num: f64,
    sum: f64,
    sum_squares: f64,
    bucket_limits: Vec<f64>,
    bucket_counts: Vec<f64>,
}

impl Distribution {
    /// Buckets the finite entries of `values`.
    ///
    /// # Returns
    /// `None` if there's no finite value to bucket.
    fn new(values: &[f32]) -> Option<Self> {
        let finite: Vec<f64> = values
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| v as f64)
            .collect();

        if finite.is_empty() {
            return None;
        }

        let (min, max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &x| {
                (min.min(x), max.max(x))
            });

        let (bucket_limits, bucket_counts) = if min == max {
            (vec![max], vec![finite.len() as f64])
        } else {
            let width = (max - min) / BUCKETS as f64;
            let mut limits: Vec<_> = (1..=BUCKETS).map(|i| min + width * i as f64).collect();
            limits[BUCKETS - 1] = max;

            let mut counts = vec![0.; BUCKETS];
            for x in &finite {
                let i = (((x - min) / width) as usize).min(BUCKETS - 1);
                counts[i] += 1.;
            }

            (limits, counts)
        };

        Some(Self {
            min,
            max,
            num: finite.len() as f64,
            sum: finite.iter().sum(),
            sum_squares: finite.iter().map(|x| x * x).sum(),
            bucket_limits,
            bucket_counts,
        })
    }
}

impl TensorBoardSink {
    /// Creates a new `TensorBoardSink` writing into `logdir`, creating it if needed.
    ///
    /// # Errors
    /// If `logdir` can't be created.
    pub fn new<P: AsRef<Path>>(logdir: P) -> io::Result<Self> {
        let logdir = logdir.as_ref();
        fs::create_dir_all(logdir)?;

        Ok(Self {
            writer: SummaryWriter::new(logdir),
        })
    }
}

fn to_usize(step: u64) -> io::Result<usize> {
    usize::try_from(step).map_err(io::Error::other)
}

impl SummarySink for TensorBoardSink {
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()> {
        self.writer.add_scalar(tag, value, to_usize(step)?);
        Ok(())
    }

    /// Non finite entries can't be plotted and are left out of the histogram.
    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()> {
        let step = to_usize(step)?;

        let Some(dist) = Distribution::new(values) else {
            warn!("skipping histogram {tag} at step {step}, it has no finite values");
            return Ok(());
        };

        if dist.num < values.len() as f64 {
            warn!(
                "histogram {tag} at step {step} dropped {} non finite values",
                values.len() - dist.num as usize
            );
        }

        self.writer.add_histogram_raw(
            tag,
            dist.min,
            dist.max,
            dist.num,
            dist.sum,
            dist.sum_squares,
            &dist.bucket_limits,
            &dist.bucket_counts,
            step,
        );
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush();
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{record_training, record_validation, NamedParam};

    #[test]
    fn distribution_spreads_values_over_buckets() {
        let dist = Distribution::new(&[0., 1., 2., 3., f32::NAN]).unwrap();

        assert_eq!(dist.num, 4.);
        assert_eq!((dist.min, dist.max), (0., 3.));
        assert_eq!(dist.sum, 6.);
        assert_eq!(dist.sum_squares, 14.);
        assert_eq!(dist.bucket_limits.len(), BUCKETS);
        assert_eq!(dist.bucket_limits[BUCKETS - 1], 3.);
        assert_eq!(dist.bucket_counts.iter().sum::<f64>(), 4.);
        assert_eq!(dist.bucket_counts[0], 1.);
        assert_eq!(dist.bucket_counts[BUCKETS - 1], 1.);
    }

    #[test]
    fn distribution_of_constant_values_has_one_bucket() {
        let dist = Distribution::new(&[0.5; 3]).unwrap();

        assert_eq!(dist.bucket_limits, [0.5]);
        assert_eq!(dist.bucket_counts, [3.]);
    }

    #[test]
    fn distribution_needs_a_finite_value() {
        assert_eq!(Distribution::new(&[]), None);
        assert_eq!(Distribution::new(&[f32::NAN, f32::INFINITY]), None);
    }

    #[test]
    fn writes_an_event_file() {
        let dir = tempfile::tempdir().unwrap();
        let logdir = dir.path().join("run");

        let mut sink = TensorBoardSink::new(&logdir).unwrap();
        let params = [NamedParam::new("w1", &[0.1, 0.2], &[0.01, 0.02])];
        record_training(&mut sink, &params, 0.5, 3).unwrap();
        record_validation(&mut sink, 0.2, 0.91, 3).unwrap();
        sink.flush().unwrap();
        drop(sink);

        let events: Vec<_> = fs::read_dir(&logdir)
            .unwrap()
            .map(|entry| entry.unwrap())
            .filter(|entry| entry.file_name().to_string_lossy().contains("tfevents"))
            .collect();

        assert_eq!(events.len(), 1);
        assert!(events[0].metadata().unwrap().len() > 0);
    }
}
