//! Integration Tests for the Cache Layer
//!
//! Exercises the scalar cache, invocation recording, replay, and the
//! expiring web cache together over one shared store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cachetrace::{
    decode, Cache, CacheError, Fetcher, MemoryStore, Replayer, Result, WebCache, STORE_OP,
};

// == Helper Functions ==

fn shared_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Fetcher double serving deterministic bodies and counting fetches.
struct CountingFetcher {
    fetches: AtomicUsize,
}

impl CountingFetcher {
    fn new() -> &'static Self {
        Box::leak(Box::new(Self {
            fetches: AtomicUsize::new(0),
        }))
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Fetcher for &CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(format!("<html>{url}</html>"))
    }
}

// == Round-Trip Tests ==

#[test]
fn test_roundtrip_every_scalar_category() {
    let cache = Cache::new(shared_store());

    let text_key = cache.store("hello").unwrap();
    let int_key = cache.store(42_i64).unwrap();
    let float_key = cache.store(2.5_f64).unwrap();
    let bytes_key = cache.store(vec![1_u8, 2, 3]).unwrap();

    assert_eq!(cache.get_text(&text_key).unwrap(), Some("hello".to_string()));
    assert_eq!(cache.get_int(&int_key).unwrap(), Some(42));
    assert_eq!(cache.get_float(&float_key).unwrap(), Some(2.5));
    assert_eq!(cache.get_raw(&bytes_key).unwrap(), Some(vec![1, 2, 3]));
}

#[test]
fn test_miss_is_never_a_default_value() {
    let cache = Cache::new(shared_store());

    // A miss is None, a stored empty string is Some
    assert_eq!(cache.get_text("unknown").unwrap(), None);

    let key = cache.store("").unwrap();
    assert_eq!(cache.get_text(&key).unwrap(), Some(String::new()));
}

// == Recording & Replay Tests ==

#[test]
fn test_sequential_calls_count_and_replay() {
    let store = shared_store();
    let cache = Cache::new(Arc::clone(&store));

    let values = ["first", "second", "third"];
    let keys: Vec<String> = values.iter().map(|v| cache.store(*v).unwrap()).collect();

    assert_eq!(cache.call_count(STORE_OP).unwrap(), 3);

    let report = cache.replay(STORE_OP).unwrap();
    assert_eq!(report.count(), 3);
    for (i, (input, output)) in report.calls().iter().enumerate() {
        assert_eq!(input, values[i]);
        assert_eq!(output, &keys[i]);
    }

    let rendered = report.to_string();
    assert_eq!(rendered.lines().count(), 4); // header + one line per call
    assert!(rendered.starts_with("Cache::store was called 3 times:"));
}

#[test]
fn test_concurrent_stores_keep_counter_and_pairing() {
    let store = shared_store();
    let cache = Arc::new(Cache::new(Arc::clone(&store)));

    let mut handles = Vec::new();
    for i in 0..50 {
        let cache = Arc::clone(&cache);
        handles.push(std::thread::spawn(move || cache.store(i as i64).unwrap()));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.call_count(STORE_OP).unwrap(), 50);

    let history = Replayer::new(store).history(STORE_OP).unwrap();
    assert_eq!(history.len(), 50);

    // Every recorded input must still be readable under its paired key
    for (input, key) in &history {
        assert_eq!(cache.get_text(key).unwrap().as_deref(), Some(input.as_str()));
    }
}

#[test]
fn test_replay_after_reset_reports_zero() {
    let cache = Cache::new(shared_store());

    cache.store("gone").unwrap();
    cache.reset().unwrap();

    let report = cache.replay(STORE_OP).unwrap();
    assert_eq!(report.count(), 0);
    assert_eq!(cache.call_count(STORE_OP).unwrap(), 0);
}

// == Web Cache Tests ==

#[tokio::test]
async fn test_web_cache_within_ttl_fetches_once() {
    let fetcher = CountingFetcher::new();
    let web = WebCache::new(shared_store(), fetcher, 10);

    let first = web.access("http://example.com").await.unwrap();
    let second = web.access("http://example.com").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.fetch_count(), 1);
    assert_eq!(web.access_count("http://example.com").unwrap(), 2);
}

#[tokio::test]
async fn test_web_cache_refetches_after_expiry() {
    let fetcher = CountingFetcher::new();
    let web = WebCache::new(shared_store(), fetcher, 1);

    web.access("http://example.com").await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    web.access("http://example.com").await.unwrap();

    assert_eq!(fetcher.fetch_count(), 2);
}

// == Shared Store Tests ==

#[tokio::test]
async fn test_scalar_and_web_caches_share_one_store() {
    let store = shared_store();
    let cache = Cache::new(Arc::clone(&store));
    let fetcher = CountingFetcher::new();
    let web = WebCache::new(Arc::clone(&store), fetcher, 10);

    let key = cache.store("persistent").unwrap();
    web.access("http://example.com").await.unwrap();

    // Web cache activity does not disturb scalar entries or histories
    assert_eq!(cache.get_text(&key).unwrap(), Some("persistent".to_string()));
    assert_eq!(cache.call_count(STORE_OP).unwrap(), 1);

    // An explicit reset wipes both
    cache.reset().unwrap();
    assert_eq!(cache.get_text(&key).unwrap(), None);
    assert_eq!(web.access_count("http://example.com").unwrap(), 0);
}

#[test]
fn test_decode_failure_is_not_masked() {
    let cache = Cache::new(shared_store());

    let key = cache.store("plainly text").unwrap();
    assert!(matches!(cache.get_int(&key), Err(CacheError::DecodeFailure(_))));

    // The value itself is untouched
    assert_eq!(
        cache.get_required(&key, decode::text).unwrap(),
        "plainly text"
    );
}
