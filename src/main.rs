//! Cachetrace demo binary
//!
//! Embedding application for the cache layer: walks through recorded
//! stores, replays the call history, and optionally fetches a URL through
//! the expiring web cache. No cache logic lives here.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachetrace::{spawn_sweep_task, Cache, Config, HttpFetcher, MemoryStore, WebCache, STORE_OP};

/// Main entry point for the cachetrace demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the in-memory store and the cache layer over it
/// 4. Start the background TTL sweep task
/// 5. Exercise store/get/replay, and fetch a URL if one was given
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachetrace=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cachetrace demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: page_ttl={}s, fetch_timeout={}s, sweep_interval={}s",
        config.page_ttl, config.fetch_timeout, config.sweep_interval
    );

    let store = Arc::new(MemoryStore::new());
    let cache = Cache::new(Arc::clone(&store));
    let sweep_handle = spawn_sweep_task(Arc::clone(&store), config.sweep_interval);

    // Recorded stores across every scalar category
    let text_key = cache.store("hello")?;
    let int_key = cache.store(42_i64)?;
    let float_key = cache.store(3.14_f64)?;

    info!(
        "Read back: {:?} / {:?} / {:?}",
        cache.get_text(&text_key)?,
        cache.get_int(&int_key)?,
        cache.get_float(&float_key)?
    );

    // Replay the recorded history
    print!("{}", cache.replay(STORE_OP)?);

    // Optionally fetch a URL through the expiring web cache
    if let Some(url) = std::env::args().nth(1) {
        let fetcher = HttpFetcher::new(config.fetch_timeout)?;
        let web_cache = WebCache::new(Arc::clone(&store), fetcher, config.page_ttl);

        let body = web_cache.access(&url).await?;
        info!(
            "Fetched {} ({} bytes), accessed {} time(s)",
            url,
            body.len(),
            web_cache.access_count(&url)?
        );
    }

    let stats = store.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    sweep_handle.abort();
    info!("Demo complete");
    Ok(())
}
