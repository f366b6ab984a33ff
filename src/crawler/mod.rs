//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - The shared frontier (visited set + pending queue)
//! - The bounded-concurrency crawl coordinator
//! - The HTTP fetch port and its outcome type
//! - Anchor extraction from fetched markup

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchOutcome, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use parser::extract_hrefs;

use crate::config::Config;
use crate::output::CrawlSummary;
use std::sync::Arc;

/// Runs a complete crawl with the HTTP fetcher
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the transport configuration
/// 2. Claim the seed URL into a fresh frontier
/// 3. Run the bounded worker pool until no reachable page is left
/// 4. Return the per-page outcomes and the distinct-visited count
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed
/// * `Err(SitewalkError)` - The HTTP client could not be built
pub async fn crawl(config: Config) -> crate::Result<CrawlSummary> {
    let fetcher = HttpFetcher::from_config(&config.http)?;
    let coordinator = Coordinator::new(config, Arc::new(fetcher));
    Ok(coordinator.run().await)
}
