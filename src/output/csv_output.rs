//! CSV record sink
//!
//! Writes one `URL,Content` header row followed by one row per accepted page.
//! Each row is encoded in memory and committed to the target in one write,
//! then flushed, so a crawl that dies midway still leaves every accepted page
//! on disk. A row whose write fails is cut back off the target, leaving the
//! file exactly as it was after the last good row.

use super::traits::{OutputError, OutputResult, PageRecord, RecordSink};
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

/// Header row of every CSV file produced by a crawl
pub const CSV_HEADER: [&str; 2] = ["URL", "Content"];

/// A byte target that can drop everything written after a given length
pub trait RowTarget: Write {
    /// Truncates the target to `len` bytes and continues writing from there
    fn rollback(&mut self, len: u64) -> std::io::Result<()>;
}

impl RowTarget for File {
    fn rollback(&mut self, len: u64) -> std::io::Result<()> {
        self.set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

impl RowTarget for Vec<u8> {
    fn rollback(&mut self, len: u64) -> std::io::Result<()> {
        self.truncate(len as usize);
        Ok(())
    }
}

/// Record sink that writes CSV rows
pub struct CsvRecordSink<W: RowTarget> {
    target: W,
    committed: u64,
    rows_written: u64,
}

impl CsvRecordSink<File> {
    /// Creates the CSV file at `path`, replacing any existing file
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file path
    ///
    /// # Returns
    ///
    /// * `Ok(CsvRecordSink)` - The file was created and the header written
    /// * `Err(OutputError)` - The file could not be replaced or created
    pub fn create(path: &Path) -> OutputResult<Self> {
        if path.exists() {
            tracing::debug!("Removing existing output file {}", path.display());
            std::fs::remove_file(path).map_err(|source| OutputError::Open {
                path: path.display().to_string(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| OutputError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_writer(file)
    }
}

impl<W: RowTarget> CsvRecordSink<W> {
    /// Wraps an empty target and writes the header row
    pub fn from_writer(target: W) -> OutputResult<Self> {
        let mut sink = Self {
            target,
            committed: 0,
            rows_written: 0,
        };
        sink.commit(&encode_row(CSV_HEADER)?)?;
        Ok(sink)
    }

    /// Returns the number of data rows written so far
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Returns the underlying target
    pub fn into_inner(self) -> W {
        self.target
    }

    /// Writes one encoded row, rolling the target back if any byte fails
    fn commit(&mut self, row: &[u8]) -> OutputResult<()> {
        let written = self
            .target
            .write_all(row)
            .and_then(|()| self.target.flush());

        if let Err(e) = written {
            if let Err(rollback) = self.target.rollback(self.committed) {
                tracing::error!(
                    "Failed to roll back partial CSV row at byte {}: {}",
                    self.committed,
                    rollback
                );
            }
            return Err(e.into());
        }

        self.committed += row.len() as u64;
        Ok(())
    }
}

/// Encodes one CSV row with quoting applied
fn encode_row(fields: [&str; 2]) -> OutputResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields)?;
    writer
        .into_inner()
        .map_err(|e| OutputError::Write(e.to_string()))
}

impl<W: RowTarget + Send> RecordSink for CsvRecordSink<W> {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        let row = encode_row([record.url.as_str(), record.content.as_str()])?;
        self.commit(&row)?;
        self.rows_written += 1;
        Ok(())
    }
}
