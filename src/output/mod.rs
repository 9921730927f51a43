//! Output module for crawl results
//!
//! This module handles:
//! - The append-only CSV sink for accepted pages
//! - Status line delivery to loggers and UIs
//! - Crawl run statistics

mod csv_output;
pub mod stats;
mod status;
mod traits;

pub use csv_output::{CsvRecordSink, RowTarget, CSV_HEADER};
pub use stats::{print_report, CrawlReport};
pub use status::{ChannelStatus, TracingStatus};
pub use traits::{OutputError, OutputResult, PageRecord, RecordSink, StatusSink};
