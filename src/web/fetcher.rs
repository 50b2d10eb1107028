//! Fetcher Module
//!
//! The external HTTP fetch interface consumed by the web cache, and its
//! reqwest-backed implementation.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{CacheError, Result};

// == Fetcher Trait ==
/// Performs the slow external fetch the web cache memoizes.
///
/// Implementations must fail explicitly on errors and timeouts; the cache
/// layer never retries and never caches a failed fetch.
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the response body.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

// == HTTP Fetcher ==
/// Fetcher backed by a reqwest client.
///
/// Only status 200 is treated as success; any other status, transport
/// error, or timeout surfaces as [`CacheError::FetchFailure`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher whose requests time out after `timeout_seconds`.
    ///
    /// The timeout guarantees a stuck fetch fails instead of hanging and
    /// silently never populating the cache.
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| CacheError::FetchFailure {
                url: String::new(),
                reason: format!("client construction failed: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CacheError::FetchFailure {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CacheError::FetchFailure {
                url: url.to_string(),
                reason: format!("unexpected status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CacheError::FetchFailure {
                url: url.to_string(),
                reason: format!("body read failed: {e}"),
            })?;

        debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
