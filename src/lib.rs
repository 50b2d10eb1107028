//! Cachetrace - An instrumented, type-erasing cache layer
//!
//! Built on a byte-oriented key-value store, the layer provides:
//! - a scalar cache that stores values under random keys and reads them
//!   back through caller-supplied decoders,
//! - transparent invocation counting and input/output history recording
//!   for wrapped operations, with ordered replay,
//! - a TTL-bounded memoization of slow external fetches with per-URL
//!   access counting.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;
pub mod tasks;
pub mod web;

pub use cache::{decode, Cache, Recorded, Recorder, ReplayReport, Replayer, Value, STORE_OP};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{KeyValueStore, MemoryStore, StoreStats};
pub use tasks::spawn_sweep_task;
pub use web::{Fetcher, HttpFetcher, WebCache};
