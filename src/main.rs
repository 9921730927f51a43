//! Sumi-Sieve main entry point
//!
//! This is the command-line interface for the Sumi-Sieve text harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_sieve::config::{load_config_with_hash, Config};
use sumi_sieve::crawler::{join_crawl, spawn_crawl, CrawlRequest};
use sumi_sieve::output::print_report;
use sumi_sieve::url::{canonicalize, target_domain};
use tracing_subscriber::EnvFilter;

/// Sumi-Sieve: A polite single-site text harvester
///
/// Sumi-Sieve walks one website depth-first from a start URL, keeps the
/// readable text of every page with enough of it, and writes the pages to
/// a CSV file with `URL` and `Content` columns.
#[derive(Parser, Debug)]
#[command(name = "sumi-sieve")]
#[command(version)]
#[command(about = "A polite single-site text harvester", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Deepest level to crawl; the start URL is depth 1
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// CSV file to write (replaced if it exists)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let mut request = CrawlRequest::from_config(cli.start_url.clone(), &config);
    if let Some(depth) = cli.max_depth {
        request.max_depth = depth;
    }
    if let Some(output) = &cli.output {
        request.output_path = output.clone();
    }
    request.validate()?;

    if cli.dry_run {
        handle_dry_run(&request, &config);
        return Ok(());
    }

    handle_crawl(request, config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sieve=info,warn"),
            1 => EnvFilter::new("sumi_sieve=debug,info"),
            2 => EnvFilter::new("sumi_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(request: &CrawlRequest, config: &Config) {
    println!("=== Sumi-Sieve Dry Run ===\n");

    println!("Request:");
    println!("  Start URL: {}", request.start_url);
    match canonicalize(request.start_url.trim(), None) {
        Ok(seed) => {
            println!("  Canonical seed: {}", seed);
            println!(
                "  Target domain: {}",
                target_domain(&seed).unwrap_or_else(|| "(none)".to_string())
            );
        }
        Err(e) => println!("  Seed is invalid and would be skipped: {}", e),
    }
    println!("  Max depth: {}", request.max_depth);
    println!("  Output: {}", request.output_path.display());

    println!("\nCrawler:");
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Minimum words: more than {}", config.crawler.min_words);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nFilters:");
    println!(
        "  Excluded extensions: {}",
        config.filters.excluded_extensions.join(", ")
    );
    println!(
        "  Excluded terms: {}",
        config.filters.excluded_terms.join(", ")
    );

    println!("\n✓ Settings are valid");
}

/// Handles the main crawl operation
async fn handle_crawl(request: CrawlRequest, config: Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} to depth {} into {}",
        request.start_url,
        request.max_depth,
        request.output_path.display()
    );

    let (handle, mut status) = spawn_crawl(request, config);
    while let Some(line) = status.recv().await {
        if !quiet {
            println!("{}", line);
        }
    }

    match join_crawl(handle).await {
        Ok(report) => {
            if !quiet {
                println!();
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
