use super::CanonicalUrl;
use crate::UrlError;
use url::Url;

/// Canonicalizes a URL according to Sumi-Sieve's identity rules
///
/// # Canonicalization Steps
///
/// 1. If `raw` is not already an `http://` or `https://` URL and a base is
///    given, resolve it against the base (relative paths, `..` segments and
///    protocol-relative `//host/path` forms)
/// 2. Parse the URL; reject if malformed
/// 3. Lowercase the scheme and host, drop the default port
/// 4. Strip trailing slashes from the path; an empty path becomes `/`
/// 5. Drop the query string and the fragment
///
/// Page identity is path based, so two URLs that differ only in query or
/// fragment canonicalize to the same value.
///
/// # Arguments
///
/// * `raw` - The URL string to canonicalize
/// * `base` - Optional base URL used to resolve relative references
///
/// # Returns
///
/// * `Ok(CanonicalUrl)` - Canonical URL
/// * `Err(UrlError)` - The URL could not be parsed; callers skip it
///
/// # Examples
///
/// ```
/// use sumi_sieve::url::canonicalize;
///
/// let url = canonicalize("http://Example.com:80/a/?q=1#top", None).unwrap();
/// assert_eq!(url.as_str(), "http://example.com/a");
/// ```
pub fn canonicalize(raw: &str, base: Option<&Url>) -> Result<CanonicalUrl, UrlError> {
    let mut url = match base {
        Some(base) if !has_http_scheme(raw) => base
            .join(raw)
            .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?,
        _ => Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?,
    };

    // The url crate already lowercases special-scheme hosts and drops their
    // default ports; other schemes keep the host as written.
    if let Some(host) = url.host_str() {
        if host.chars().any(|c| c.is_ascii_uppercase()) {
            let lowered = host.to_ascii_lowercase();
            url.set_host(Some(&lowered))
                .map_err(|e| UrlError::Malformed(format!("Failed to set host: {}", e)))?;
        }
    } else if matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::MissingHost(raw.to_string()));
    }

    if !url.cannot_be_a_base() {
        let path = normalize_path(url.path());
        url.set_path(&path);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(CanonicalUrl(url))
}

/// Returns true if the string already carries an HTTP(S) scheme
fn has_http_scheme(raw: &str) -> bool {
    let lowered = raw.trim_start().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

/// Removes trailing slashes; the root path stays `/`
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
