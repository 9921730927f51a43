use serde::Deserialize;
use std::time::Duration;

/// Default file extensions that are never followed
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".aspx", ".docx", ".doc", ".jpeg"];

/// Default substrings that disqualify a link
pub const DEFAULT_EXCLUDED_TERMS: &[&str] = &["news", "#"];

/// Main configuration structure for Sumi-Sieve
///
/// Every section is optional; a missing section uses its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub filters: FilterConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl; the seed is depth 1
    pub max_depth: u32,

    /// Pause before each link-discovery fetch (milliseconds)
    pub politeness_delay_ms: u64,

    /// Extracted text must have more than this many words to be recorded
    pub min_words: usize,

    /// Total time allowed for one fetch (seconds)
    pub fetch_timeout_secs: u64,

    /// Time allowed to establish a connection (seconds)
    pub connect_timeout_secs: u64,

    /// Largest response body read from one fetch (bytes)
    pub max_body_bytes: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            politeness_delay_ms: 1000,
            min_words: 50,
            fetch_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

impl CrawlerConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Link filter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilterConfig {
    /// Path suffixes (matched case-insensitively) that are never followed
    pub excluded_extensions: Vec<String>,

    /// Substrings (matched case-insensitively) that disqualify a link
    pub excluded_terms: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            excluded_terms: DEFAULT_EXCLUDED_TERMS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiSieve".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Path to the CSV file receiving (URL, Content) rows
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "scraped_content.csv".to_string(),
        }
    }
}
