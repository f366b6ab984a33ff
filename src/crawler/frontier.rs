//! Crawl frontier: the shared visited-set and pending-queue bookkeeping
//!
//! The frontier is the only mutable state shared between workers. A single
//! mutex guards the visited set, the FIFO pending queue, and the in-flight
//! counter together, so a claim is one atomic check-and-insert and the
//! termination predicate can never observe a half-applied update.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

/// Shared frontier for one crawl run
pub struct Frontier {
    state: Mutex<FrontierState>,
    changed: Notify,
}

#[derive(Default)]
struct FrontierState {
    /// Every URL ever claimed; grows monotonically
    visited: HashSet<String>,

    /// Claimed URLs awaiting a fetch, oldest first
    pending: VecDeque<String>,

    /// URLs taken by a worker and not yet completed
    in_flight: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            changed: Notify::new(),
        }
    }

    /// Atomically claims a URL for fetching
    ///
    /// If the URL has never been seen it is added to the visited set and the
    /// pending queue in one step and `true` is returned: the caller's claim
    /// succeeded and a fetch will happen. A URL that was already claimed
    /// returns `false` with no side effect. This is the sole synchronization
    /// point that prevents duplicate fetches.
    pub fn try_claim(&self, url: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        if !state.visited.insert(url.to_string()) {
            return false;
        }
        state.pending.push_back(url.to_string());
        drop(state);

        // Wake any worker parked on an empty queue.
        self.changed.notify_waiters();
        true
    }

    /// Removes and returns the oldest pending URL, marking it in-flight
    ///
    /// `None` means nothing is available *right now* — other workers may
    /// still be fetching pages whose links will refill the queue, so an empty
    /// answer is not the end of the crawl. See [`Frontier::is_idle`].
    pub fn take(&self) -> Option<String> {
        let mut state = self.state.lock().unwrap();
        let next = state.pending.pop_front();
        if next.is_some() {
            state.in_flight += 1;
        }
        next
    }

    /// Marks one previously taken URL as fully processed
    ///
    /// Must be called exactly once per successful [`Frontier::take`], after
    /// any discovered links have been claimed.
    pub fn complete(&self) {
        let mut state = self.state.lock().unwrap();
        debug_assert!(state.in_flight > 0, "complete() without a matching take()");
        state.in_flight = state.in_flight.saturating_sub(1);
        let idle = state.pending.is_empty() && state.in_flight == 0;
        drop(state);

        if idle {
            self.changed.notify_waiters();
        }
    }

    /// True when the queue is empty and no worker holds in-flight work
    ///
    /// This is the termination predicate: an empty queue alone is not enough,
    /// because an in-flight fetch may still enqueue new URLs.
    pub fn is_idle(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.pending.is_empty() && state.in_flight == 0
    }

    /// Number of URLs waiting in the pending queue
    pub fn pending_len(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    /// Whether the pending queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().pending.is_empty()
    }

    /// Number of distinct URLs ever claimed
    pub fn visited_count(&self) -> usize {
        self.state.lock().unwrap().visited.len()
    }

    /// Snapshot of the visited set
    pub fn visited_urls(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.iter().cloned().collect()
    }

    /// Waits until the frontier changes, with a bounded poll interval
    ///
    /// A notification can race with the caller's own emptiness check, so the
    /// wait is capped and callers re-check their condition in a loop.
    pub async fn wait_for_change(&self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.changed.notified()).await;
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
