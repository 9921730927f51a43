//! Crawl run statistics
//!
//! A [`CrawlReport`] is filled in by the crawl engine as pages move through
//! their visit states and is returned to the caller when the run ends.

use crate::state::VisitState;
use chrono::{DateTime, Utc};

/// Statistics for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    // Run metadata
    pub seed: String,
    pub target_domain: Option<String>,
    pub max_depth: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    // Visit outcomes
    pub pages_visited: u64,
    pub pages_recorded: u64,
    pub pages_without_content: u64,
    pub pages_expanded: u64,

    // Pruning and skips
    pub pruned_by_depth: u64,
    pub fetch_failures: u64,
    pub duplicates_skipped: u64,
    pub invalid_urls: u64,

    // Output
    pub sink_failures: u64,
    pub links_queued: u64,
}

impl CrawlReport {
    /// Creates an empty report stamped with the current time
    pub fn new(seed: &str, max_depth: u32) -> Self {
        Self {
            seed: seed.to_string(),
            target_domain: None,
            max_depth,
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_recorded: 0,
            pages_without_content: 0,
            pages_expanded: 0,
            pruned_by_depth: 0,
            fetch_failures: 0,
            duplicates_skipped: 0,
            invalid_urls: 0,
            sink_failures: 0,
            links_queued: 0,
        }
    }

    /// Tallies a visit state change
    ///
    /// `Pruned` straight from `Unvisited` counts as a depth prune; `Pruned`
    /// after the content step counts as a fetch failure.
    pub fn record_transition(&mut self, from: VisitState, to: VisitState) {
        match (from, to) {
            (_, VisitState::Visiting) => self.pages_visited += 1,
            (_, VisitState::Recorded) => self.pages_recorded += 1,
            (_, VisitState::Expanded) => self.pages_expanded += 1,
            (VisitState::Unvisited, VisitState::Pruned) => self.pruned_by_depth += 1,
            (_, VisitState::Pruned) => self.fetch_failures += 1,
            _ => {}
        }
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the run duration in seconds, if the run has finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Returns the share of visited pages that were recorded, as a percentage
    pub fn record_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_recorded as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!("Seed: {}", report.seed);
    if let Some(domain) = &report.target_domain {
        println!("Target domain: {}", domain);
    }
    println!("Max depth: {}", report.max_depth);
    println!("Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(secs) = report.duration_seconds() {
        println!("Duration: {}s", secs);
    }

    println!("\nPages:");
    println!("  Visited: {}", report.pages_visited);
    println!(
        "  Recorded: {} ({:.1}%)",
        report.pages_recorded,
        report.record_rate()
    );
    println!("  Without content: {}", report.pages_without_content);
    println!("  Expanded: {}", report.pages_expanded);

    println!("\nSkipped:");
    println!("  Beyond max depth: {}", report.pruned_by_depth);
    println!("  Fetch failures: {}", report.fetch_failures);
    println!("  Already visited: {}", report.duplicates_skipped);
    println!("  Invalid URLs: {}", report.invalid_urls);
    println!("  Row write failures: {}", report.sink_failures);
}
