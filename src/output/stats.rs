//! Crawl summary types and stdout reporting

/// Outcome of visiting a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was fetched; counts of anchors seen and newly claimed links
    Fetched {
        /// Anchors found in the page, accepted or not
        links_found: usize,
        /// Links that entered the frontier for the first time via this page
        links_followed: usize,
    },

    /// The fetch failed; the crawl recorded the reason and moved on
    FetchFailed {
        /// Short failure description (HTTP status or network error)
        reason: String,
    },
}

impl PageOutcome {
    /// Whether the page produced a body
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }
}

/// A fetched (or attempted) page with its outcome
#[derive(Debug, Clone)]
pub struct PageVisit {
    /// The canonical URL that was fetched
    pub url: String,
    /// What happened
    pub outcome: PageOutcome,
}

/// Final accounting for one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    /// Number of distinct URLs ever claimed (the visited-set size)
    pub visited: usize,

    /// Per-page outcomes, in completion order
    pub visits: Vec<PageVisit>,
}

impl CrawlSummary {
    /// Creates a summary from the visited count and the recorded visits
    pub fn new(visited: usize, visits: Vec<PageVisit>) -> Self {
        Self { visited, visits }
    }

    /// Number of pages fetched successfully
    pub fn success_count(&self) -> usize {
        self.visits
            .iter()
            .filter(|visit| visit.outcome.is_success())
            .count()
    }

    /// Number of pages whose fetch failed
    pub fn failure_count(&self) -> usize {
        self.visits.len() - self.success_count()
    }

    /// URLs that were fetched (or attempted), in completion order
    pub fn visited_urls(&self) -> Vec<&str> {
        self.visits.iter().map(|visit| visit.url.as_str()).collect()
    }
}

/// Prints the crawl summary to stdout
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &CrawlSummary) {
    println!("Visited {} URLs.", summary.visited);

    let failures: Vec<&PageVisit> = summary
        .visits
        .iter()
        .filter(|visit| !visit.outcome.is_success())
        .collect();

    if !failures.is_empty() {
        println!("{} fetches failed:", failures.len());
        for visit in failures {
            if let PageOutcome::FetchFailed { reason } = &visit.outcome {
                println!("  - {}: {}", visit.url, reason);
            }
        }
    }
}
