use std::io;

use super::{Record, SummarySink};

/// Keeps every received record in memory, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<Record>,
}

impl MemorySink {
    /// Creates a new empty `MemorySink`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records received so far.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl SummarySink for MemorySink {
    fn add_scalar(&mut self, tag: &str, value: f32, step: u64) -> io::Result<()> {
        self.records.push(Record::Scalar {
            tag: tag.to_string(),
            value,
            step,
        });
        Ok(())
    }

    fn add_histogram(&mut self, tag: &str, values: &[f32], step: u64) -> io::Result<()> {
        self.records.push(Record::Histogram {
            tag: tag.to_string(),
            values: values.to_vec(),
            step,
        });
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_arrival_order() {
        let mut sink = MemorySink::new();
        sink.add_histogram("h", &[1.0, 2.0], 0).unwrap();
        sink.add_scalar("s", 0.5, 1).unwrap();

        let tags: Vec<_> = sink.records().iter().map(Record::tag).collect();
        assert_eq!(tags, ["h", "s"]);
        assert_eq!(sink.records()[1].step(), 1);

        sink.clear();
        assert!(sink.is_empty());
    }
}
