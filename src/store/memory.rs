//! Memory Store Module
//!
//! In-process implementation of the key-value store contract, combining
//! HashMap string storage with TTL expiration and list storage for
//! invocation histories.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, StoreStats, StoredEntry};

// == Interior State ==
#[derive(Debug, Default)]
struct Inner {
    /// String entries, with optional expiry
    strings: HashMap<String, StoredEntry>,
    /// List entries (append-only from the cache layer's point of view)
    lists: HashMap<String, Vec<Vec<u8>>>,
    /// Backend metrics
    stats: StoreStats,
}

// == Memory Store ==
/// In-process key-value backend with TTL expiry.
///
/// All operations synchronize on one interior lock, which makes each trait
/// method atomic. Expired string entries are removed lazily on read and in
/// bulk by [`sweep_expired`](MemoryStore::sweep_expired).
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| CacheError::StoreUnavailable("store lock poisoned".to_string()))
    }

    // == Stats ==
    /// Returns a snapshot of current backend metrics.
    pub fn stats(&self) -> Result<StoreStats> {
        let inner = self.lock()?;
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.strings.len();
        stats.total_lists = inner.lists.len();
        Ok(stats)
    }

    // == Sweep Expired ==
    /// Removes all expired string entries.
    ///
    /// Returns the number of entries removed. Reads already treat expired
    /// entries as absent; this pass just reclaims their memory.
    pub fn sweep_expired(&self) -> Result<usize> {
        let mut inner = self.lock()?;

        let expired_keys: Vec<String> = inner
            .strings
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            inner.strings.remove(&key);
            inner.stats.record_expired();
        }

        Ok(count)
    }

    // == Length ==
    /// Returns the current number of string entries.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.strings.len())
    }

    /// Returns true if the store holds no string entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.strings.is_empty())
    }
}

impl KeyValueStore for MemoryStore {
    // == Set ==
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .strings
            .insert(key.to_string(), StoredEntry::new(value.to_vec(), None));
        Ok(())
    }

    // == Get ==
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.lock()?;

        let expired = matches!(inner.strings.get(key), Some(entry) if entry.is_expired());
        if expired {
            inner.strings.remove(key);
            inner.stats.record_expired();
            inner.stats.record_miss();
            return Ok(None);
        }

        match inner.strings.get(key).map(|entry| entry.value.clone()) {
            Some(value) => {
                inner.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                inner.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Incr ==
    fn incr(&self, key: &str) -> Result<i64> {
        let mut inner = self.lock()?;

        // An expired or absent counter restarts at zero
        let current = match inner.strings.get(key) {
            Some(entry) if entry.is_expired() => 0,
            Some(entry) => std::str::from_utf8(&entry.value)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| {
                    CacheError::DecodeFailure(format!("value at {key} is not an integer"))
                })?,
            None => 0,
        };

        let next = current + 1;
        inner
            .strings
            .insert(key.to_string(), StoredEntry::new(next.to_string().into_bytes(), None));
        Ok(next)
    }

    // == RPush ==
    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut inner = self.lock()?;
        let list = inner.lists.entry(key.to_string()).or_default();
        list.push(value.to_vec());
        Ok(list.len())
    }

    // == LRange ==
    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let inner = self.lock()?;

        let Some(list) = inner.lists.get(key) else {
            return Ok(Vec::new());
        };

        let len = list.len() as i64;
        let mut start = if start < 0 { len + start } else { start };
        let mut stop = if stop < 0 { len + stop } else { stop };
        if start < 0 {
            start = 0;
        }
        if stop >= len {
            stop = len - 1;
        }
        if len == 0 || start > stop {
            return Ok(Vec::new());
        }

        Ok(list[start as usize..=stop as usize].to_vec())
    }

    // == SetEx ==
    fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()> {
        let mut inner = self.lock()?;
        inner.strings.insert(
            key.to_string(),
            StoredEntry::new(value.to_vec(), Some(ttl_seconds)),
        );
        Ok(())
    }

    // == Flush All ==
    fn flush_all(&self) -> Result<()> {
        let mut inner = self.lock()?;
        inner.strings.clear();
        inner.lists.clear();
        Ok(())
    }
}
