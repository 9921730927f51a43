//! Output sink traits and types
//!
//! This module defines the two sinks a crawl writes to: the append-only
//! record sink that receives (URL, content) rows, and the status sink that
//! receives human-readable progress lines.

use crate::url::CanonicalUrl;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to open output file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A page that passed the content gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Canonical URL of the page
    pub url: CanonicalUrl,

    /// Extracted readable text
    pub content: String,
}

/// Append-only sink for page records
///
/// Records arrive in acceptance order and are never revisited. A failed
/// write leaves no trace of that record in the sink; the crawl keeps going.
pub trait RecordSink: Send {
    /// Appends one record to the end of the sink
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()>;
}

impl RecordSink for Vec<PageRecord> {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Sink for human-readable status lines
///
/// Implementations must not block the crawl; they may be called from a
/// background task.
pub trait StatusSink: Send + Sync {
    /// Delivers one status line
    fn emit(&self, line: &str);
}
