//! Crawler module for fetching pages and walking a single site
//!
//! This module contains the crawl logic, including:
//! - HTTP fetching behind the `Fetcher` seam
//! - Readable-text extraction and the word-count content gate
//! - Link extraction and same-site filtering
//! - The depth-first work-list with its politeness pause
//! - The crawl engine and the run controller around it

mod content;
mod controller;
mod engine;
mod fetcher;
mod filters;
mod parser;
mod scheduler;

pub use content::{word_count, ContentGate, ReadableTextExtractor, TextExtractor, DEFAULT_MIN_WORDS};
pub use controller::{join_crawl, run_crawl, run_crawl_with, spawn_crawl, CrawlRequest};
pub use engine::{CrawlSettings, Crawler};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use filters::{CrawlFilters, LinkRejection};
pub use parser::extract_links;
pub use scheduler::{QueuedUrl, Scheduler};
