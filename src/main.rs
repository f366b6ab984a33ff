//! Sitewalk main entry point
//!
//! This is the command-line interface for the sitewalk crawler.

use anyhow::Context;
use clap::Parser;
use sitewalk::config::{load_config, validate, Config};
use sitewalk::crawler::crawl;
use sitewalk::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitewalk: a concurrent same-site crawler
///
/// Sitewalk fetches a seed page, follows every link that stays inside the
/// configured base-URL scope, and keeps going with a bounded pool of workers
/// until no reachable page is left.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A concurrent same-site breadth-first crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured seed URL
    #[arg(long)]
    seed: Option<String>,

    /// Override the configured base URL (scope prefix)
    #[arg(long)]
    base_url: Option<String>,

    /// Override the configured worker count
    #[arg(long)]
    workers: Option<usize>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
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

/// Applies command-line overrides on top of the loaded configuration
///
/// Overrides change the crawl inputs, so the merged configuration is
/// re-validated before use.
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(seed) = &cli.seed {
        config.crawler.seed = seed.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }
    if let Some(workers) = cli.workers {
        config.crawler.max_workers = workers;
    }

    if cli.seed.is_some() || cli.base_url.is_some() || cli.workers.is_some() {
        validate(config).context("command-line overrides produced an invalid configuration")?;
    }

    Ok(())
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sitewalk Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed: {}", config.crawler.seed);
    println!("  Scope: {}", config.crawler.base_url);
    println!("  Max workers: {}", config.crawler.max_workers);
    println!(
        "  Echo discovered URLs: {}",
        config.crawler.echo_discovered
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        seed = %config.crawler.seed,
        base_url = %config.crawler.base_url,
        workers = config.crawler.max_workers,
        "starting crawl"
    );

    let start = std::time::Instant::now();
    let summary = crawl(config).await?;

    tracing::info!(
        "Crawl completed: {} pages in {:?}",
        summary.visited,
        start.elapsed()
    );
    print_summary(&summary);

    Ok(())
}
