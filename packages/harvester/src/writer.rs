//! Batched CSV output.

use std::fs::File;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::types::ExtractedRecord;

/// Accumulates extracted records and appends them to the CSV in fixed-size
/// batches, pausing between flushes to pace the run.
pub struct BatchWriter {
    writer: csv::Writer<File>,
    header: Vec<String>,
    batch: Vec<ExtractedRecord>,
    batch_size: usize,
    flush_pause: Duration,
    written: usize,
}

impl BatchWriter {
    /// Create the destination file and write the header row immediately.
    pub fn create(
        path: &Path,
        header: &[String],
        batch_size: usize,
        flush_pause: Duration,
    ) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        writer.flush()?;

        Ok(Self {
            writer,
            header: header.to_vec(),
            batch: Vec::new(),
            batch_size,
            flush_pause,
            written: 0,
        })
    }

    /// Queue one record; flushes (and pauses) when the batch is full.
    pub fn push(&mut self, record: ExtractedRecord) -> Result<()> {
        self.batch.push(record);

        if self.batch.len() == self.batch_size {
            self.flush_batch()?;
            thread::sleep(self.flush_pause);
        }

        Ok(())
    }

    /// Flush any remaining partial batch; no trailing pause.
    ///
    /// Returns the total number of records written across the run.
    pub fn finish(mut self) -> Result<usize> {
        if !self.batch.is_empty() {
            self.flush_batch()?;
        }
        self.writer.flush()?;
        Ok(self.written)
    }

    /// Write the accumulated batch as one flushed append, in header order.
    fn flush_batch(&mut self) -> Result<()> {
        let count = self.batch.len();
        tracing::info!(records = count, "writing batch");

        for record in self.batch.drain(..) {
            self.writer
                .write_record(self.header.iter().map(|column| record.get(column)))?;
        }
        self.writer.flush()?;
        self.written += count;

        Ok(())
    }
}
