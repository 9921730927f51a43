//! URL handling module for Sumi-Sieve
//!
//! This module provides URL canonicalization and target-domain extraction.
//! Every URL the crawler compares, stores, or fetches goes through
//! [`canonicalize`] first, so two URLs are the same page exactly when their
//! [`CanonicalUrl`] strings are equal.

mod domain;
mod normalize;

use std::fmt;
use url::Url;

// Re-export main functions
pub use domain::target_domain;
pub use normalize::canonicalize;

/// A URL in canonical form
///
/// Canonical URLs have a lowercase scheme and host, no default port, no query
/// string, no fragment, and no trailing slash except for the root path. The
/// only way to build one is through [`canonicalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// Returns the canonical string form
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying parsed URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL scheme (always lowercase)
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns the host, if the URL has one
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL path
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        let url = canonicalize("https://example.com/a/", None).unwrap();
        assert_eq!(url.to_string(), url.as_str());
        assert_eq!(url.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_accessors() {
        let url = canonicalize("HTTPS://Example.COM:8443/Docs/", None).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), Some("example.com"));
        assert_eq!(url.path(), "/Docs");
    }

    #[test]
    fn test_equal_canonical_urls_hash_equal() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(canonicalize("http://Example.com:80/a/", None).unwrap());
        set.insert(canonicalize("http://example.com/a?x=1#top", None).unwrap());
        assert_eq!(set.len(), 1);
    }
}
