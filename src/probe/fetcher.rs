//! HTTP fetcher implementation
//!
//! This module handles the single GET request a probe makes:
//! - Building the HTTP client with configured timeouts
//! - Rotating the user agent per request
//! - Classifying transport and status failures

use crate::config::FetcherConfig;
use crate::ProbeError;
use rand::seq::IndexedRandom;
use reqwest::{header::USER_AGENT, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Downloads a page body
///
/// Implementations do not retry; a failure is reported once and retry policy
/// is left to the caller.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ProbeError>> + Send;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetcher {
    /// Builds a fetcher from configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use asin_probe::config::FetcherConfig;
    /// use asin_probe::HttpFetcher;
    ///
    /// let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
    /// ```
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
        })
    }

    /// Picks a user agent at random from the configured pool
    fn pick_user_agent(&self) -> Option<&str> {
        self.user_agents
            .choose(&mut rand::rng())
            .map(|agent| agent.as_str())
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ProbeError> {
        let parsed = Url::parse(url).map_err(|e| fetch_error(url, e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(fetch_error(
                url,
                format!("unsupported scheme: {}", parsed.scheme()),
            ));
        }

        let mut request = self.client.get(parsed);
        if let Some(agent) = self.pick_user_agent() {
            tracing::trace!("Using user agent: {}", agent);
            request = request.header(USER_AGENT, agent);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                fetch_error(url, "request timeout".to_string())
            } else if e.is_connect() {
                fetch_error(url, format!("connection failed: {}", e))
            } else {
                fetch_error(url, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(url, format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(url, format!("failed to read body: {}", e)))
    }
}

fn fetch_error(url: &str, message: String) -> ProbeError {
    ProbeError::Fetch {
        url: url.to_string(),
        message,
    }
}
