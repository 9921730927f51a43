use super::CanonicalUrl;

/// Returns the target domain of a canonical URL
///
/// The target domain is the host plus any non-default port (the network
/// location). Links are only followed when their own target domain is exactly
/// equal to the seed's, so neither subdomains nor other ports on the same host
/// are crawled.
///
/// # Arguments
///
/// * `url` - The canonical URL to take the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase host, with `:port` when non-default
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::{canonicalize, target_domain};
///
/// let url = canonicalize("https://Example.com/path", None).unwrap();
/// assert_eq!(target_domain(&url), Some("example.com".to_string()));
///
/// let url = canonicalize("http://127.0.0.1:8080/", None).unwrap();
/// assert_eq!(target_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn target_domain(url: &CanonicalUrl) -> Option<String> {
    let host = url.host()?;
    match url.as_url().port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}
