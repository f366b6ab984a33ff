//! HTTP fetch port
//!
//! The coordinator talks to the network through the [`PageFetcher`] trait and
//! consumes an explicit [`FetchOutcome`] per page, so transport failures flow
//! through ordinary values instead of error propagation, and tests can swap in
//! a scripted fetcher.

use crate::config::HttpConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Result of fetching a single page
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// 2xx response with the body text
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection, timeout, or protocol failure
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Whether the fetch produced a body
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short failure description, `None` for a successful fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// The fetch half of the page port: given a URL, produce body text or a
/// failure reason
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a URL; never fails the caller, every failure is an outcome
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Builds the shared HTTP client from the transport configuration
///
/// Redirects follow reqwest's default policy; plain HTTP stays allowed so the
/// crawler can be pointed at local and mock servers.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher with a client configured from `config`
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if !status.is_success() {
                    return FetchOutcome::HttpError {
                        status_code: status.as_u16(),
                    };
                }

                match response.text().await {
                    Ok(body) => FetchOutcome::Success {
                        status_code: status.as_u16(),
                        body,
                    },
                    Err(e) => FetchOutcome::NetworkError {
                        error: e.to_string(),
                    },
                }
            }
            Err(e) => {
                // Classify error
                if e.is_timeout() {
                    FetchOutcome::NetworkError {
                        error: "Request timeout".to_string(),
                    }
                } else if e.is_connect() {
                    FetchOutcome::NetworkError {
                        error: "Connection refused".to_string(),
                    }
                } else {
                    FetchOutcome::NetworkError {
                        error: e.to_string(),
                    }
                }
            }
        }
    }
}
