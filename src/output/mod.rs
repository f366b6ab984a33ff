//! Crawl result reporting
//!
//! The crawl produces a [`CrawlSummary`]: the distinct-visited count plus one
//! outcome per fetched page, printable to stdout.

mod stats;

pub use stats::{print_summary, CrawlSummary, PageOutcome, PageVisit};
