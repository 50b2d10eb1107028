//! Web Cache Module
//!
//! Memoizes a slow external fetch per URL for a fixed TTL while counting
//! access attempts per URL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use crate::cache::decode;
use crate::error::Result;
use crate::store::KeyValueStore;
use crate::web::Fetcher;

// == Key Layout ==
/// Key of the per-URL access counter.
pub fn count_key(url: &str) -> String {
    format!("count:{url}")
}

/// Key of the cached page body for a URL.
pub fn page_key(url: &str) -> String {
    format!("page:{url}")
}

// == Web Cache ==
/// Expiring fetch cache with per-URL access counting.
///
/// Per URL the entry moves through absent -> fetching -> cached(deadline)
/// -> absent. The check-and-possibly-fetch decision runs under a lock
/// scoped to the URL, so concurrent accesses to the same cold URL perform
/// exactly one fetch, while unrelated URLs never contend. The access
/// counter is incremented inside the locked region, exactly once per
/// attempt, hit or miss.
#[derive(Debug)]
pub struct WebCache<S, F> {
    store: Arc<S>,
    fetcher: F,
    ttl_seconds: u64,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<S: KeyValueStore, F: Fetcher> WebCache<S, F> {
    // == Constructor ==
    /// Creates a web cache over the given store and fetcher.
    ///
    /// # Arguments
    /// * `store` - Shared key-value store handle
    /// * `fetcher` - External fetch implementation
    /// * `ttl_seconds` - How long a fetched body stays cached
    pub fn new(store: Arc<S>, fetcher: F, ttl_seconds: u64) -> Self {
        Self {
            store,
            fetcher,
            ttl_seconds,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the lock guarding `url`, creating it on first use.
    fn url_lock(&self, url: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(url.to_string()).or_default())
    }

    // == Access ==
    /// Returns the page body for `url`, fetching at most once per TTL window.
    ///
    /// Counts the access attempt unconditionally, then either returns the
    /// non-expired cached body or performs the fetch and caches the result
    /// with the configured TTL. A failed fetch propagates and leaves the
    /// cache unpopulated, so the next access retries.
    pub async fn access(&self, url: &str) -> Result<String> {
        let lock = self.url_lock(url);
        let _guard = lock.lock().await;

        self.store.incr(&count_key(url))?;

        if let Some(bytes) = self.store.get(&page_key(url))? {
            debug!(url, "cache hit");
            return decode::text(bytes);
        }

        info!(url, "cache miss, fetching");
        let body = self.fetcher.fetch(url).await?;
        self.store
            .set_ex(&page_key(url), body.as_bytes(), self.ttl_seconds)?;

        Ok(body)
    }

    // == Access Count ==
    /// Number of access attempts recorded for `url`, hits and misses alike.
    pub fn access_count(&self, url: &str) -> Result<i64> {
        match self.store.get(&count_key(url))? {
            Some(bytes) => decode::int(bytes),
            None => Ok(0),
        }
    }
}
