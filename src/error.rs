//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
///
/// Every variant surfaces directly to the caller of the failing operation;
/// nothing is retried or masked inside the layer itself.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing key-value store is unreachable or its interior state is broken
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Explicit miss for a caller that required the key to be present.
    /// Distinct from a stored empty value, which is a successful read.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A caller-supplied decoder rejected the stored bytes
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    /// The external fetch failed (non-200 status, transport error, timeout)
    #[error("Fetch failed for {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// Input/output history lengths diverged for an operation.
    /// Recording is designed so this cannot happen; replay checks rather
    /// than trusts.
    #[error("History corruption for {op}: {inputs} inputs vs {outputs} outputs")]
    HistoryCorruption {
        op: String,
        inputs: usize,
        outputs: usize,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
