//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end, from the seed URL to the CSV file on disk.

use std::path::Path;
use std::time::{Duration, Instant};
use sumi_sieve::config::{Config, CrawlerConfig, UserAgentConfig};
use sumi_sieve::crawler::{join_crawl, run_crawl, spawn_crawl, CrawlRequest};
use sumi_sieve::output::TracingStatus;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(politeness_delay_ms: u64) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth: 2,
            politeness_delay_ms,
            min_words: 50,
            fetch_timeout_secs: 5,
            connect_timeout_secs: 2,
            max_body_bytes: 1024 * 1024,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
        },
        ..Config::default()
    }
}

/// Builds a page whose article holds `words` words followed by `links`
fn article_page(words: usize, links: &[&str]) -> String {
    let text: Vec<String> = (0..words).map(|i| format!("alpha{}", i)).collect();
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();
    format!(
        r#"<html><head><title>Test</title></head><body>
        <nav>Site menu</nav>
        <article><p>{}</p></article>
        <ul>{}</ul>
        </body></html>"#,
        text.join(" "),
        anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn read_rows(path: &Path) -> Vec<(String, String)> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader.headers().expect("Missing header").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["URL", "Content"]);

    reader
        .records()
        .map(|r| {
            let r = r.expect("Bad CSV row");
            (r[0].to_string(), r[1].to_string())
        })
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Seed page: gate fetch plus link-discovery fetch
    mount_page(
        &mock_server,
        "/",
        article_page(
            60,
            &[
                "/about",
                "/photo.jpg",
                "/news/today",
                "https://other.test/elsewhere",
                "/missing",
            ],
        ),
        2,
    )
    .await;
    mount_page(&mock_server, "/about", article_page(60, &["/", "/deep"]), 2).await;
    mount_page(&mock_server, "/photo.jpg", String::new(), 0).await;
    mount_page(&mock_server, "/news/today", article_page(60, &[]), 0).await;
    // Depth 3 is beyond the limit
    mount_page(&mock_server, "/deep", article_page(60, &[]), 0).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    let request = CrawlRequest::new(base_url.clone(), 2, &output);

    let report = run_crawl(&request, &create_test_config(0), &TracingStatus)
        .await
        .expect("Crawl failed");

    let rows = read_rows(&output);
    let urls: Vec<&str> = rows.iter().map(|(url, _)| url.as_str()).collect();
    assert_eq!(
        urls,
        vec![format!("{}/", base_url), format!("{}/about", base_url)]
    );
    assert!(rows[0].1.contains("alpha0"));
    assert!(rows[0].1.contains("alpha59"));
    assert!(!rows[0].1.contains("Site menu"));

    // "/", "/about" and the unserved "/missing"
    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.pages_recorded, 2);
    assert_eq!(report.fetch_failures, 1);
    assert!(report.pruned_by_depth >= 1);
}

#[tokio::test]
async fn test_thin_page_is_not_written_but_expanded() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", article_page(50, &["/child"]), 2).await;
    mount_page(&mock_server, "/child", article_page(51, &[]), 2).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    let request = CrawlRequest::new(base_url.clone(), 2, &output);

    let report = run_crawl(&request, &create_test_config(0), &TracingStatus)
        .await
        .expect("Crawl failed");

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, format!("{}/child", base_url));
    assert_eq!(report.pages_without_content, 1);
}

#[tokio::test]
async fn test_existing_output_is_replaced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", article_page(60, &[]), 2).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    std::fs::write(&output, "URL,Content\nhttps://stale.test/,old run\n").unwrap();

    let request = CrawlRequest::new(base_url.clone(), 1, &output);
    run_crawl(&request, &create_test_config(0), &TracingStatus)
        .await
        .expect("Crawl failed");

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, format!("{}/", base_url));
}

#[tokio::test]
async fn test_spawned_crawl_streams_status_lines() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", article_page(60, &["/a"]), 2).await;
    mount_page(&mock_server, "/a", article_page(10, &[]), 2).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    let request = CrawlRequest::new(base_url.clone(), 2, &output);

    let (handle, mut status) = spawn_crawl(request, create_test_config(0));
    let mut lines = Vec::new();
    while let Some(line) = status.recv().await {
        lines.push(line);
    }
    let report = join_crawl(handle).await.expect("Crawl failed");

    assert_eq!(report.pages_recorded, 1);
    assert_eq!(lines.first().map(String::as_str), Some("Starting scraper..."));
    assert_eq!(lines.last().map(String::as_str), Some("Scraping complete!"));
    assert!(lines.contains(&format!("Scraping depth 1: {}/", base_url)));
    assert!(lines.contains(&format!("Scraped content from {}/", base_url)));
    assert!(lines.contains(&format!("No sufficient content at {}/a", base_url)));
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page(60, &[])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    let request = CrawlRequest::new(base_url, 1, &output);

    let report = run_crawl(&request, &create_test_config(0), &TracingStatus)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_recorded, 1);
}

#[tokio::test]
async fn test_politeness_delay_between_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", article_page(60, &["/next"]), 2).await;
    mount_page(&mock_server, "/next", article_page(60, &[]), 2).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    let request = CrawlRequest::new(base_url, 2, &output);

    let start = Instant::now();
    run_crawl(&request, &create_test_config(100), &TracingStatus)
        .await
        .expect("Crawl failed");

    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_unreachable_seed_finishes_with_empty_csv() {
    // Nothing listens on port 9 locally
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.csv");
    let request = CrawlRequest::new("http://127.0.0.1:9/", 3, &output);

    let report = run_crawl(&request, &create_test_config(0), &TracingStatus)
        .await
        .expect("Crawl failed");

    assert!(read_rows(&output).is_empty());
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.fetch_failures, 1);
}
