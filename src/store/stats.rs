//! Store Statistics Module
//!
//! Tracks backend metrics including hits, misses, and expiry removals.

use serde::Serialize;

// == Store Stats ==
/// Tracks key-value backend metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of successful string reads
    pub hits: u64,
    /// Number of failed string reads (key absent or expired)
    pub misses: u64,
    /// Number of entries removed because their TTL elapsed
    pub expired: u64,
    /// Current number of string entries
    pub total_entries: usize,
    /// Current number of list keys
    pub total_lists: usize,
}

impl StoreStats {
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the read hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the expiry-removal counter.
    pub fn record_expired(&mut self) {
        self.expired += 1;
    }
}
