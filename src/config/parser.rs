use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sumi_sieve::config::load_config;
///
/// let config = load_config(Path::new("sieve.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// Parses and validates configuration from a TOML string
///
/// Unknown keys are rejected, so a misspelled setting fails loudly instead
/// of silently falling back to its default.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 of configuration text
pub fn hash_config(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads a configuration and returns it with the hash of the text it was
/// parsed from
///
/// The file is read once, so the hash always describes the settings that
/// produced the CSV, even if the file changes while the crawl starts.
///
/// # Returns
///
/// * `Ok((Config, String))` - The validated configuration and its hash
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_config(&content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SIEVE_TOML: &str = r#"
[crawler]
max-depth = 3
politeness-delay-ms = 250
min-words = 80
fetch-timeout-secs = 15
max-body-bytes = 65536

[filters]
excluded-extensions = [".pdf", ".zip"]
excluded-terms = ["login", "/tag/"]

[user-agent]
crawler-name = "docs-sieve"
crawler-version = "2.1"
contact-url = "https://example.com/about"

[output]
csv-path = "./pages.csv"
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_full_sieve_config() {
        let config = parse_config(SIEVE_TOML).unwrap();

        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.crawler.politeness_delay().as_millis(), 250);
        assert_eq!(config.crawler.min_words, 80);
        assert_eq!(config.crawler.fetch_timeout().as_secs(), 15);
        assert_eq!(config.crawler.connect_timeout().as_secs(), 10);
        assert_eq!(config.crawler.max_body_bytes, 65536);
        assert_eq!(config.filters.excluded_extensions, vec![".pdf", ".zip"]);
        assert_eq!(config.filters.excluded_terms, vec!["login", "/tag/"]);
        assert_eq!(
            config.user_agent.header_value(),
            "docs-sieve/2.1 (+https://example.com/about)"
        );
        assert_eq!(config.output.csv_path, "./pages.csv");
    }

    #[test]
    fn test_filters_section_replaces_defaults() {
        let config = parse_config("[filters]\nexcluded-terms = []\n").unwrap();

        assert!(config.filters.excluded_terms.is_empty());
        assert_eq!(config.filters.excluded_extensions.len(), 6);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.crawler.max_depth, 10);
        assert_eq!(config.crawler.min_words, 50);
        assert_eq!(config.user_agent.contact_url, None);
        assert_eq!(config.output.csv_path, "scraped_content.csv");
    }

    #[test]
    fn test_misspelled_key_rejected() {
        let result = parse_config("[crawler]\nmax-depht = 2\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = parse_config("[robots]\nobey = true\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_connect_timeout_longer_than_fetch_rejected() {
        let result = parse_config("[crawler]\nfetch-timeout-secs = 5\nconnect-timeout-secs = 6\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_bad_contact_url_rejected() {
        let result = parse_config("[user-agent]\ncontact-url = \"about us\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/sieve.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_hash_of_empty_text() {
        assert_eq!(
            hash_config(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_describes_parsed_text() {
        let file = write_config(SIEVE_TOML);

        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.output.csv_path, "./pages.csv");
        assert_eq!(hash, hash_config(SIEVE_TOML));
        assert_ne!(hash, hash_config("[crawler]\nmax-depth = 4\n"));
    }

    #[test]
    fn test_invalid_file_has_no_hash() {
        let file = write_config("[crawler]\nmax-depth = 0\n");
        assert!(matches!(
            load_config_with_hash(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
