//! HTML parser for extracting followable links
//!
//! This module parses fetched HTML, resolves every `<a href>` against the
//! page's URL, canonicalizes it, and keeps the links that pass the run's
//! [`CrawlFilters`].

use crate::crawler::filters::CrawlFilters;
use crate::url::{canonicalize, CanonicalUrl};
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Extracts the followable links from an HTML page
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a>` tags without an `href`
/// - hrefs that cannot be canonicalized (dropped one at a time, never
///   aborting the rest of the page)
/// - links rejected by [`CrawlFilters::check`]
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The canonical URL of the page, for resolving relative links
/// * `filters` - The run's link filters
///
/// # Returns
///
/// The set of canonical links to follow. Iteration order carries no meaning
/// for correctness; a sorted set keeps traversal reproducible.
///
/// # Example
///
/// ```
/// use sumi_sieve::config::FilterConfig;
/// use sumi_sieve::crawler::{extract_links, CrawlFilters};
/// use sumi_sieve::url::canonicalize;
///
/// let base = canonicalize("https://example.com/", None).unwrap();
/// let filters = CrawlFilters::for_seed(&base, &FilterConfig::default());
/// let html = r#"<a href="/page">Link</a><a href="https://other.com/">Away</a>"#;
///
/// let links = extract_links(html, &base, &filters);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links.iter().next().unwrap().as_str(), "https://example.com/page");
/// ```
pub fn extract_links(html: &str, base_url: &CanonicalUrl, filters: &CrawlFilters) -> BTreeSet<CanonicalUrl> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let link = match canonicalize(href.trim(), Some(base_url.as_url())) {
            Ok(link) => link,
            Err(e) => {
                tracing::debug!("Dropping unparseable link {:?} on {}: {}", href, base_url, e);
                continue;
            }
        };

        match filters.check(&link) {
            Ok(()) => {
                links.insert(link);
            }
            Err(reason) => {
                tracing::trace!("Filtered link {} ({:?})", link, reason);
            }
        }
    }

    links
}
