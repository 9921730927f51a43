//! State module for tracking crawl progress
//!
//! This module defines the lifecycle of a single page visit. The crawl engine
//! moves every visit through these states and tallies the terminal ones in
//! the run's [`CrawlReport`](crate::output::CrawlReport).

mod page_state;

// Re-export main types
pub use page_state::VisitState;
