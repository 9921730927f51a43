//! Run controller
//!
//! Wraps one crawl with its lifecycle: request validation, opening the CSV
//! sink, the "Starting" and "complete" status lines, and running the crawl
//! on a background task so the caller stays responsive.

use crate::config::Config;
use crate::crawler::content::{ReadableTextExtractor, TextExtractor};
use crate::crawler::engine::{CrawlSettings, Crawler};
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::output::{ChannelStatus, CrawlReport, CsvRecordSink, StatusSink};
use crate::SieveError;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Parameters for one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Seed URL as typed by the user
    pub start_url: String,

    /// Deepest level to visit; the seed is depth 1
    pub max_depth: u32,

    /// CSV file to (re)create
    pub output_path: PathBuf,
}

impl CrawlRequest {
    pub fn new(start_url: impl Into<String>, max_depth: u32, output_path: impl Into<PathBuf>) -> Self {
        Self {
            start_url: start_url.into(),
            max_depth,
            output_path: output_path.into(),
        }
    }

    /// Builds a request from configuration defaults
    pub fn from_config(start_url: impl Into<String>, config: &Config) -> Self {
        Self::new(
            start_url,
            config.crawler.max_depth,
            config.output.csv_path.clone(),
        )
    }

    /// Rejects requests that must not start a run
    pub fn validate(&self) -> Result<(), SieveError> {
        if self.start_url.trim().is_empty() {
            return Err(SieveError::InvalidRequest(
                "Please enter a start URL".to_string(),
            ));
        }

        if self.max_depth < 1 {
            return Err(SieveError::InvalidRequest(
                "Max depth must be a positive integer".to_string(),
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(SieveError::InvalidRequest(
                "Please choose an output file".to_string(),
            ));
        }

        Ok(())
    }
}

/// Runs one crawl over HTTP and writes the accepted pages to CSV
///
/// # Arguments
///
/// * `request` - Seed, depth and output path
/// * `config` - Transport, filter and politeness settings
/// * `status` - Receives every progress line
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion
/// * `Err(SieveError)` - The request was invalid or the run could not start
pub async fn run_crawl(
    request: &CrawlRequest,
    config: &Config,
    status: &dyn StatusSink,
) -> Result<CrawlReport, SieveError> {
    request.validate()?;

    let fetcher = match HttpFetcher::from_config(&config.user_agent, &config.crawler) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            status.emit(&format!("Error: {}", e));
            return Err(e.into());
        }
    };
    let crawler = Crawler::new(
        fetcher,
        ReadableTextExtractor::new(),
        CrawlSettings::from_config(config),
    );

    run_crawl_with(&crawler, request, status).await
}

/// Runs one crawl with an already built crawler
///
/// Creates the CSV file (replacing any previous one) before the first fetch.
/// Failing to open it is the only fatal error of a run.
pub async fn run_crawl_with<F: Fetcher, X: TextExtractor>(
    crawler: &Crawler<F, X>,
    request: &CrawlRequest,
    status: &dyn StatusSink,
) -> Result<CrawlReport, SieveError> {
    request.validate()?;
    status.emit("Starting scraper...");

    let mut sink = match CsvRecordSink::create(&request.output_path) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!("Cannot open {}: {}", request.output_path.display(), e);
            status.emit(&format!("Error: {}", e));
            return Err(e.into());
        }
    };

    let report = crawler
        .crawl(&request.start_url, request.max_depth, &mut sink, status)
        .await;

    tracing::info!(
        "Wrote {} rows to {}",
        sink.rows_written(),
        request.output_path.display()
    );
    status.emit("Scraping complete!");
    Ok(report)
}

/// Starts a crawl on a background task
///
/// Status lines arrive on the returned receiver while the crawl runs; the
/// channel closes when the task ends.
pub fn spawn_crawl(
    request: CrawlRequest,
    config: Config,
) -> (
    JoinHandle<Result<CrawlReport, SieveError>>,
    UnboundedReceiver<String>,
) {
    let (status, rx) = ChannelStatus::channel();
    let handle = tokio::spawn(async move { run_crawl(&request, &config, &status).await });
    (handle, rx)
}

/// Waits for a spawned crawl, folding a panicked or cancelled task into
/// [`SieveError::Task`]
pub async fn join_crawl(
    handle: JoinHandle<Result<CrawlReport, SieveError>>,
) -> Result<CrawlReport, SieveError> {
    handle
        .await
        .map_err(|e| SieveError::Task(e.to_string()))?
}
