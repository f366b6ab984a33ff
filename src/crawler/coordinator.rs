//! Crawl coordination: the bounded worker pool and its termination logic
//!
//! The coordinator owns the frontier and a fetch port, claims the seed, and
//! runs a fixed pool of workers. Each worker loops: take a URL, fetch it,
//! extract and canonicalize its links, and claim every accepted link back into
//! the frontier — so newly discovered URLs become visible to sibling workers
//! while the crawl is still in flight. A worker that finds the queue empty
//! does not exit until no sibling holds in-flight work either, which is what
//! lets dynamically discovered URLs keep the pool alive.

use crate::config::Config;
use crate::crawler::fetcher::{FetchOutcome, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_hrefs;
use crate::output::{CrawlSummary, PageOutcome, PageVisit};
use crate::url::canonicalize;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Orchestrates a bounded pool of fetch workers over a shared frontier
pub struct Coordinator {
    config: Arc<Config>,
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn PageFetcher>,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates a coordinator with its own empty frontier
    ///
    /// Each coordinator owns independent crawl state, so multiple crawls can
    /// run in the same process without interfering.
    pub fn new(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            frontier: Arc::new(Frontier::new()),
            fetcher,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the crawl when cancelled
    ///
    /// On cancellation workers stop claiming new work and exit promptly;
    /// in-flight fetches are abandoned rather than awaited.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Read access to the shared frontier (observability)
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the crawl to exhaustion (or cancellation) and returns the summary
    pub async fn run(&self) -> CrawlSummary {
        let base_url = &self.config.crawler.base_url;

        // The seed goes through the same canonicalization as any discovered
        // link, so the dedupe key for the start page is consistent.
        let seed = match canonicalize(&self.config.crawler.seed, base_url) {
            Some(seed) => seed,
            None => {
                tracing::warn!(
                    seed = %self.config.crawler.seed,
                    base_url = %base_url,
                    "seed is outside the crawl scope, nothing to do"
                );
                return CrawlSummary::default();
            }
        };

        if !self.frontier.try_claim(&seed) {
            // Only possible when run() is called twice on one coordinator.
            tracing::warn!(url = %seed, "seed already claimed, crawl is done");
            return CrawlSummary::new(self.frontier.visited_count(), Vec::new());
        }
        self.echo_discovered(&seed);
        tracing::info!(url = %seed, "seed claimed");

        let workers = self.config.crawler.max_workers.max(1);
        let visits: Arc<Mutex<Vec<PageVisit>>> = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let worker = Worker {
                config: Arc::clone(&self.config),
                frontier: Arc::clone(&self.frontier),
                fetcher: Arc::clone(&self.fetcher),
                cancel: self.cancel.clone(),
                visits: Arc::clone(&visits),
            };
            handles.push(tokio::spawn(worker.run(worker_id)));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        let visits = std::mem::take(&mut *visits.lock().unwrap());
        let summary = CrawlSummary::new(self.frontier.visited_count(), visits);
        tracing::info!(
            visited = summary.visited,
            failed = summary.failure_count(),
            "crawl finished"
        );
        summary
    }

    fn echo_discovered(&self, url: &str) {
        if self.config.crawler.echo_discovered {
            println!("{}", url);
        }
    }
}

/// One member of the fetch pool
struct Worker {
    config: Arc<Config>,
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn PageFetcher>,
    cancel: CancellationToken,
    visits: Arc<Mutex<Vec<PageVisit>>>,
}

impl Worker {
    /// Drains the frontier until the crawl is globally finished or cancelled
    async fn run(self, worker_id: usize) {
        loop {
            if self.cancel.is_cancelled() {
                tracing::debug!(worker_id, "worker cancelled");
                break;
            }

            match self.frontier.take() {
                Some(url) => {
                    self.visit(&url).await;
                    self.frontier.complete();
                }
                None => {
                    if self.frontier.is_idle() {
                        // Queue empty and nothing in flight anywhere: done.
                        break;
                    }
                    // A sibling is mid-fetch and may enqueue more work, so
                    // wait for the frontier to change and look again.
                    self.frontier.wait_for_change().await;
                }
            }
        }
        tracing::debug!(worker_id, "worker exiting");
    }

    /// Fetches one claimed URL and feeds its links back into the frontier
    async fn visit(&self, url: &str) {
        tracing::debug!(url, "fetching");

        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!(url, "fetch abandoned");
                return;
            }
            outcome = self.fetcher.fetch(url) => outcome,
        };

        match outcome {
            FetchOutcome::Success { body, .. } => {
                let hrefs = extract_hrefs(&body);
                let links_found = hrefs.len();
                let mut links_followed = 0usize;

                for href in hrefs {
                    if let Some(canonical) =
                        canonicalize(&href, &self.config.crawler.base_url)
                    {
                        if self.frontier.try_claim(&canonical) {
                            links_followed += 1;
                            if self.config.crawler.echo_discovered {
                                println!("{}", canonical);
                            }
                            tracing::info!(url = %canonical, "discovered");
                        }
                    }
                }

                tracing::debug!(url, links_found, links_followed, "page processed");
                self.record(
                    url,
                    PageOutcome::Fetched {
                        links_found,
                        links_followed,
                    },
                );
            }
            failure => {
                let reason = failure
                    .failure_reason()
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::warn!(url, %reason, "fetch failed");
                self.record(url, PageOutcome::FetchFailed { reason });
            }
        }
    }

    fn record(&self, url: &str, outcome: PageOutcome) {
        self.visits.lock().unwrap().push(PageVisit {
            url: url.to_string(),
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, HttpConfig};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Scripted fetch port serving a fixed link graph
    struct ScriptedFetcher {
        pages: HashMap<String, FetchOutcome>,
        delay: Duration,
    }

    impl ScriptedFetcher {
        fn new(pages: HashMap<String, FetchOutcome>) -> Self {
            Self {
                pages,
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> FetchOutcome {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match self.pages.get(url) {
                Some(outcome) => outcome.clone(),
                None => FetchOutcome::HttpError { status_code: 404 },
            }
        }
    }

    fn page_with_links(links: &[&str]) -> FetchOutcome {
        let anchors: String = links
            .iter()
            .map(|link| format!(r#"<a href="{}">link</a>"#, link))
            .collect();
        FetchOutcome::Success {
            status_code: 200,
            body: format!("<html><body>{}</body></html>", anchors),
        }
    }

    fn test_config(seed: &str, base_url: &str, max_workers: usize) -> Config {
        Config {
            crawler: CrawlerConfig {
                seed: seed.to_string(),
                base_url: base_url.to_string(),
                max_workers,
                echo_discovered: false,
            },
            http: HttpConfig::default(),
        }
    }

    fn example_site() -> HashMap<String, FetchOutcome> {
        // Root links to a decorated page, a fragment page, and an off-site
        // page; /a links back to the root and on to /d.
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com".to_string(),
            page_with_links(&[
                "https://example.com/a?x=1",
                "https://example.com/b#frag",
                "https://other.com/c",
            ]),
        );
        pages.insert(
            "https://example.com/a".to_string(),
            page_with_links(&["https://example.com", "https://example.com/d"]),
        );
        pages.insert("https://example.com/b".to_string(), page_with_links(&[]));
        pages.insert("https://example.com/d".to_string(), page_with_links(&[]));
        pages
    }

    async fn run_crawl(
        pages: HashMap<String, FetchOutcome>,
        max_workers: usize,
    ) -> CrawlSummary {
        let config = test_config("https://example.com", "https://example.com", max_workers);
        let coordinator = Coordinator::new(config, Arc::new(ScriptedFetcher::new(pages)));
        coordinator.run().await
    }

    #[tokio::test]
    async fn visits_every_reachable_in_scope_url_once() {
        let summary = run_crawl(example_site(), 4).await;

        assert_eq!(summary.visited, 4);
        assert_eq!(summary.success_count(), 4);
        assert_eq!(summary.failure_count(), 0);

        let mut urls = summary.visited_urls();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "https://example.com",
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/d",
            ]
        );
    }

    #[tokio::test]
    async fn off_site_links_are_never_fetched() {
        let summary = run_crawl(example_site(), 4).await;
        assert!(summary
            .visited_urls()
            .iter()
            .all(|url| url.starts_with("https://example.com")));
    }

    #[tokio::test]
    async fn single_and_many_workers_agree_on_the_visited_set() {
        let sequential = run_crawl(example_site(), 1).await;
        let concurrent = run_crawl(example_site(), 8).await;

        let mut left = sequential.visited_urls();
        let mut right = concurrent.visited_urls();
        left.sort();
        right.sort();

        assert_eq!(sequential.visited, concurrent.visited);
        assert_eq!(left, right);
    }

    #[tokio::test]
    async fn fetch_failure_does_not_abort_the_crawl() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com".to_string(),
            page_with_links(&["https://example.com/broken", "https://example.com/fine"]),
        );
        pages.insert(
            "https://example.com/broken".to_string(),
            FetchOutcome::HttpError { status_code: 500 },
        );
        pages.insert(
            "https://example.com/fine".to_string(),
            page_with_links(&[]),
        );

        let summary = run_crawl(pages, 3).await;

        assert_eq!(summary.visited, 3);
        assert_eq!(summary.success_count(), 2);
        assert_eq!(summary.failure_count(), 1);

        let broken = summary
            .visits
            .iter()
            .find(|visit| visit.url == "https://example.com/broken")
            .expect("failed page recorded");
        assert_eq!(
            broken.outcome,
            PageOutcome::FetchFailed {
                reason: "HTTP 500".to_string()
            }
        );
    }

    #[tokio::test]
    async fn network_failures_are_recorded_with_their_reason() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com".to_string(),
            page_with_links(&["https://example.com/gone"]),
        );
        pages.insert(
            "https://example.com/gone".to_string(),
            FetchOutcome::NetworkError {
                error: "Connection refused".to_string(),
            },
        );

        let summary = run_crawl(pages, 2).await;
        assert_eq!(summary.failure_count(), 1);
        assert!(summary.visits.iter().any(|visit| {
            visit.outcome
                == PageOutcome::FetchFailed {
                    reason: "Connection refused".to_string(),
                }
        }));
    }

    #[tokio::test]
    async fn cyclic_graphs_terminate() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com".to_string(),
            page_with_links(&["https://example.com/a"]),
        );
        pages.insert(
            "https://example.com/a".to_string(),
            page_with_links(&["https://example.com/b"]),
        );
        pages.insert(
            "https://example.com/b".to_string(),
            page_with_links(&["https://example.com", "https://example.com/a"]),
        );

        let summary = tokio::time::timeout(Duration::from_secs(5), run_crawl(pages, 4))
            .await
            .expect("crawl must terminate on a cyclic graph");

        assert_eq!(summary.visited, 3);
    }

    #[tokio::test]
    async fn duplicate_links_are_claimed_once() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com".to_string(),
            page_with_links(&[
                "https://example.com/x",
                "https://example.com/x",
                "https://example.com/x?utm=1",
            ]),
        );
        pages.insert("https://example.com/x".to_string(), page_with_links(&[]));

        let summary = run_crawl(pages, 4).await;

        assert_eq!(summary.visited, 2);
        let root = summary
            .visits
            .iter()
            .find(|visit| visit.url == "https://example.com")
            .unwrap();
        // Three anchors seen, one distinct claim made.
        assert_eq!(
            root.outcome,
            PageOutcome::Fetched {
                links_found: 3,
                links_followed: 1
            }
        );
    }

    #[tokio::test]
    async fn link_free_page_is_a_success_not_a_failure() {
        let mut pages = HashMap::new();
        pages.insert("https://example.com".to_string(), page_with_links(&[]));

        let summary = run_crawl(pages, 2).await;

        assert_eq!(summary.visited, 1);
        assert_eq!(summary.failure_count(), 0);
        assert_eq!(
            summary.visits[0].outcome,
            PageOutcome::Fetched {
                links_found: 0,
                links_followed: 0
            }
        );
    }

    #[tokio::test]
    async fn seed_outside_scope_yields_empty_summary() {
        let config = test_config("https://other.com", "https://example.com", 2);
        let coordinator =
            Coordinator::new(config, Arc::new(ScriptedFetcher::new(HashMap::new())));

        let summary = coordinator.run().await;
        assert_eq!(summary.visited, 0);
        assert!(summary.visits.is_empty());
    }

    #[tokio::test]
    async fn cancellation_stops_the_crawl_promptly() {
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com".to_string(),
            page_with_links(&["https://example.com/slow"]),
        );
        pages.insert(
            "https://example.com/slow".to_string(),
            page_with_links(&[]),
        );

        let fetcher = ScriptedFetcher::new(pages).with_delay(Duration::from_secs(60));
        let config = test_config("https://example.com", "https://example.com", 2);
        let coordinator = Arc::new(Coordinator::new(config, Arc::new(fetcher)));
        let cancel = coordinator.cancellation_token();

        let crawl = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.run().await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();

        // Workers abandon the in-flight fetch instead of waiting out the
        // 60-second scripted delay.
        let summary = tokio::time::timeout(Duration::from_secs(2), crawl)
            .await
            .expect("cancelled crawl must return promptly")
            .unwrap();

        // The seed was claimed but its fetch never finished.
        assert_eq!(summary.visited, 1);
        assert!(summary.visits.is_empty());
    }

    #[tokio::test]
    async fn wide_graphs_drain_fully_under_concurrency() {
        // One hub linking to many leaves, each leaf linking onward to a
        // second level; exercises claims racing across workers.
        let mut pages = HashMap::new();
        let leaves: Vec<String> = (0..40)
            .map(|i| format!("https://example.com/leaf{}", i))
            .collect();
        let leaf_refs: Vec<&str> = leaves.iter().map(String::as_str).collect();
        pages.insert("https://example.com".to_string(), page_with_links(&leaf_refs));

        for (i, leaf) in leaves.iter().enumerate() {
            let next = format!("https://example.com/deep{}", i);
            pages.insert(leaf.clone(), page_with_links(&[next.as_str()]));
            pages.insert(next, page_with_links(&[]));
        }

        let summary = run_crawl(pages, 8).await;

        // Hub + 40 leaves + 40 deep pages.
        assert_eq!(summary.visited, 81);
        assert_eq!(summary.success_count(), 81);
    }
}
