use std::io::{self, Write};

use serde::Serialize;

use super::SummarySink;

/// Writes each record as a single JSON object line onto `W`.
///
/// Non finite values are written as the strings `"NaN"`, `"inf"` and `"-inf"`, so every line
/// parses back into a `Record`.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    line: Vec<u8>,
}

/// Borrowing twin of `Record` so histograms aren't copied before writing.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Line<'a> {
    Scalar {
        tag: &'a str,
        #[serde(serialize_with = "super::float::scalar::serialize")]
        value: f32,
        step: u64,
    },
    Histogram {
        tag: &'a str,
        #[serde(serialize_with = "super::float::seq::serialize")]
        values: &'a [f32],
        step: u64,
    },
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a new `JsonLinesSink` instance.
    ///
    /// Wrap `writer` in a `BufWriter` when it's a file, this sink performs a
    /// write per record.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line: Vec::new(),
        }
    }

    /// Returns the underlying writer, without flushing it.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &Line) -> io::Result<()> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, line)?;
        self.line.push(b'\n');
        self.writer.write_all(&self.line)
    }
}

impl<W: Write> SummarySink for JsonLinesSink<W> {
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()> {
        self.write_line(&Line::Scalar { tag, value, step })
    }

    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()> {
        self.write_line(&Line::Histogram { tag, values, step })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sink::Record;

    #[test]
    fn writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.add_scalar("train loss", 0.5, 3).unwrap();
        sink.add_histogram("trainable parameter w", &[0.25, -1.0], 3).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let records: Vec<Record> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(
            records,
            [
                Record::Scalar {
                    tag: "train loss".into(),
                    value: 0.5,
                    step: 3
                },
                Record::Histogram {
                    tag: "trainable parameter w".into(),
                    values: vec![0.25, -1.0],
                    step: 3
                },
            ]
        );
    }

    #[test]
    fn non_finite_values_read_back() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.add_scalar("train loss", f32::INFINITY, 0).unwrap();
        sink.add_histogram("trainable parameter w", &[f32::NAN, f32::NEG_INFINITY], 0).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], r#"{"kind":"scalar","tag":"train loss","value":"inf","step":0}"#);

        let records: Vec<Record> = lines
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records[0].tag(), "train loss");
        let Record::Histogram { values, .. } = &records[1] else {
            panic!("expected a histogram: {}", lines[1]);
        };
        assert!(values[0].is_nan());
        assert_eq!(values[1], f32::NEG_INFINITY);
    }
}
