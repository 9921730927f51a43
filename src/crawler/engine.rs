//! Crawl engine - depth-first traversal of one site
//!
//! The engine owns the visited set for a run and drives every page through
//! fetch -> content gate -> record -> politeness pause -> link discovery.
//! Nothing that goes wrong with a single page stops the run: bad URLs are
//! skipped, failed fetches prune only their own branch, and a row that cannot
//! be written is reported and left behind.

use crate::config::{Config, FilterConfig};
use crate::crawler::content::{ContentGate, TextExtractor, DEFAULT_MIN_WORDS};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::filters::CrawlFilters;
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::{QueuedUrl, Scheduler};
use crate::output::{CrawlReport, PageRecord, RecordSink, StatusSink};
use crate::state::VisitState;
use crate::url::{canonicalize, CanonicalUrl};
use std::collections::HashSet;
use std::time::Duration;

/// Per-crawler settings that do not change between runs
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Pause before each link-discovery fetch
    pub politeness_delay: Duration,

    /// Extracted text must have more than this many words to be recorded
    pub min_words: usize,

    /// Excluded extensions and terms
    pub filters: FilterConfig,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            politeness_delay: Duration::from_secs(1),
            min_words: DEFAULT_MIN_WORDS,
            filters: FilterConfig::default(),
        }
    }
}

impl CrawlSettings {
    /// Takes the crawl settings from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            politeness_delay: config.crawler.politeness_delay(),
            min_words: config.crawler.min_words,
            filters: config.filters.clone(),
        }
    }
}

/// Single-site, depth-bounded crawler
pub struct Crawler<F, X> {
    fetcher: F,
    gate: ContentGate<X>,
    settings: CrawlSettings,
}

impl<F: Fetcher, X: TextExtractor> Crawler<F, X> {
    /// Creates a crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Network transport used for every fetch
    /// * `extractor` - Readable-text extractor behind the content gate
    /// * `settings` - Delay, word threshold and link filters
    pub fn new(fetcher: F, extractor: X, settings: CrawlSettings) -> Self {
        let gate = ContentGate::new(extractor, settings.min_words);
        Self {
            fetcher,
            gate,
            settings,
        }
    }

    /// Crawls the site behind `seed` down to `max_depth`
    ///
    /// The seed is depth 1. Every page that passes the content gate is
    /// appended to `records` in the order it was accepted, and progress lines
    /// go to `status` as they happen. The visited set lives only for this
    /// call, so repeated runs never share state.
    ///
    /// # Visit Flow
    ///
    /// 1. Depth above `max_depth` -> pruned
    /// 2. Already visited -> skipped
    /// 3. Claim the URL in the visited set
    /// 4. Content gate; append a record when text qualifies
    /// 5. Politeness pause (always, even without content)
    /// 6. Fetch the HTML; on failure prune this branch only
    /// 7. Queue every unvisited same-site link at depth + 1
    ///
    /// # Returns
    ///
    /// The run's [`CrawlReport`]. Per-page failures are tallied there rather
    /// than returned as errors.
    pub async fn crawl(
        &self,
        seed: &str,
        max_depth: u32,
        records: &mut dyn RecordSink,
        status: &dyn StatusSink,
    ) -> CrawlReport {
        let mut report = CrawlReport::new(seed, max_depth);

        let seed_url = match canonicalize(seed.trim(), None) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Seed URL {} is invalid: {}", seed, e);
                status.emit(&format!("Skipping invalid URL {}: {}", seed, e));
                report.invalid_urls += 1;
                report.finish();
                return report;
            }
        };

        let filters = CrawlFilters::for_seed(&seed_url, &self.settings.filters);
        report.target_domain = Some(filters.target_domain().to_string());
        tracing::info!(
            "Crawling {} (domain {}, max depth {})",
            seed_url,
            filters.target_domain(),
            max_depth
        );

        let mut visited: HashSet<CanonicalUrl> = HashSet::new();
        let mut scheduler = Scheduler::new(self.settings.politeness_delay);
        scheduler.push(seed_url, 1);

        while let Some(QueuedUrl { url, depth }) = scheduler.next_url() {
            let mut state = VisitState::Unvisited;

            if depth > max_depth {
                advance(&mut report, &mut state, VisitState::Pruned);
                continue;
            }

            // Single dedup point; claimed before any of the page's links are queued
            if !visited.insert(url.clone()) {
                report.duplicates_skipped += 1;
                continue;
            }

            advance(&mut report, &mut state, VisitState::Visiting);
            status.emit(&format!("Scraping depth {}: {}", depth, url));
            tracing::debug!("Visiting {} at depth {} ({} pending)", url, depth, scheduler.pending());

            match self.gate.fetch_qualified_content(&self.fetcher, &url).await {
                Some(content) => {
                    let record = PageRecord {
                        url: url.clone(),
                        content,
                    };
                    match records.write_record(&record) {
                        Ok(()) => {
                            status.emit(&format!("Scraped content from {}", url));
                            advance(&mut report, &mut state, VisitState::Recorded);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to write record for {}: {}", url, e);
                            status.emit(&format!("Error writing CSV row for {}: {}", url, e));
                            report.sink_failures += 1;
                            advance(&mut report, &mut state, VisitState::Skipped);
                        }
                    }
                }
                None => {
                    status.emit(&format!("No sufficient content at {}", url));
                    report.pages_without_content += 1;
                    advance(&mut report, &mut state, VisitState::Skipped);
                }
            }

            scheduler.pause().await;

            let html = match self.fetcher.fetch(url.as_url()).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Link discovery failed for {}: {}", url, e);
                    advance(&mut report, &mut state, VisitState::Pruned);
                    continue;
                }
            };

            let links = extract_links(&String::from_utf8_lossy(&html), &url, &filters);
            let unvisited: Vec<CanonicalUrl> = links
                .into_iter()
                .filter(|link| !visited.contains(link))
                .collect();
            tracing::debug!("Found {} new links on {}", unvisited.len(), url);

            report.links_queued += scheduler.push_children(unvisited, depth + 1) as u64;
            advance(&mut report, &mut state, VisitState::Expanded);
        }

        report.finish();
        tracing::info!(
            "Crawl of {} finished: {} visited, {} recorded",
            seed,
            report.pages_visited,
            report.pages_recorded
        );
        report
    }
}

/// Moves a visit to its next state and tallies it
fn advance(report: &mut CrawlReport, state: &mut VisitState, next: VisitState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid visit transition {} -> {}",
        state,
        next
    );
    report.record_transition(*state, next);
    *state = next;
}
