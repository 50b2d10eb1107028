//! Key-Value Store Module
//!
//! Defines the byte-oriented store contract the cache layer is built on,
//! plus an in-process backend with TTL expiry.

mod entry;
mod memory;
mod stats;

// Re-export public types
pub use entry::{current_timestamp_ms, StoredEntry};
pub use memory::MemoryStore;
pub use stats::StoreStats;

use crate::error::Result;

// == Key-Value Store Trait ==
/// Contract for the backing key-value store.
///
/// Keys and values are opaque byte strings from the store's perspective;
/// decoding is always the caller's concern. Implementations must make each
/// individual operation atomic and safe under concurrent callers.
pub trait KeyValueStore: Send + Sync {
    /// Stores `value` under `key` with no expiration, overwriting any
    /// previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the bytes stored at `key`, or `None` on an explicit miss
    /// (absent key or elapsed TTL). A stored empty value is `Some(vec![])`,
    /// never `None`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the integer at `key` by one and returns the
    /// new value. An absent key counts as 0.
    fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the tail of the list at `key`, creating the list
    /// if needed. Returns the new list length.
    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Returns the list elements between `start` and `stop`, both inclusive.
    /// Negative offsets count from the end of the list (`-1` is the last
    /// element). An absent list yields an empty result.
    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Stores `value` under `key` with a TTL; once `ttl_seconds` elapse the
    /// key behaves as absent.
    fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()>;

    /// Removes every key from the store. Destructive; callers invoke this
    /// explicitly, never as a side effect of construction.
    fn flush_all(&self) -> Result<()>;
}
