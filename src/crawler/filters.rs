//! Link filters for a single crawl run
//!
//! The filters are fixed when the run starts: the target domain is pinned
//! from the canonical seed URL and never recomputed while crawling.

use crate::config::FilterConfig;
use crate::url::{target_domain, CanonicalUrl};

/// Why a candidate link was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRejection {
    /// Scheme other than http or https
    Scheme,
    /// Path ends with an excluded file extension
    Extension,
    /// Link points at another host or port
    Domain,
    /// Link contains an excluded term
    Term,
}

/// Immutable link filters for one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlFilters {
    excluded_extensions: Vec<String>,
    excluded_terms: Vec<String>,
    target_domain: String,
}

impl CrawlFilters {
    /// Builds filters pinned to the seed's target domain
    ///
    /// A seed without a host gets an empty target domain, which no link can
    /// match, so the crawl stops after the seed.
    pub fn for_seed(seed: &CanonicalUrl, config: &FilterConfig) -> Self {
        Self::new(
            target_domain(seed).unwrap_or_default(),
            &config.excluded_extensions,
            &config.excluded_terms,
        )
    }

    /// Builds filters from explicit parts
    pub fn new(target_domain: String, excluded_extensions: &[String], excluded_terms: &[String]) -> Self {
        Self {
            excluded_extensions: excluded_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            excluded_terms: excluded_terms
                .iter()
                .map(|term| term.to_lowercase())
                .collect(),
            target_domain,
        }
    }

    /// Returns the pinned target domain
    pub fn target_domain(&self) -> &str {
        &self.target_domain
    }

    /// Checks a canonical link against every filter
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The link may be followed
    /// * `Err(LinkRejection)` - The first filter that rejected it
    pub fn check(&self, link: &CanonicalUrl) -> Result<(), LinkRejection> {
        if !matches!(link.scheme(), "http" | "https") {
            return Err(LinkRejection::Scheme);
        }

        let path = link.path().to_lowercase();
        if self.excluded_extensions.iter().any(|ext| path.ends_with(ext.as_str())) {
            return Err(LinkRejection::Extension);
        }

        if target_domain(link).as_deref() != Some(self.target_domain.as_str()) {
            return Err(LinkRejection::Domain);
        }

        let lowered = link.as_str().to_lowercase();
        if self.excluded_terms.iter().any(|term| lowered.contains(term.as_str())) {
            return Err(LinkRejection::Term);
        }

        Ok(())
    }
}
