//! Web Module
//!
//! Expiring fetch cache: the external fetch interface and the TTL-bounded
//! per-URL memoization layer.

mod cache;
mod fetcher;

// Re-export public types
pub use cache::{count_key, page_key, WebCache};
pub use fetcher::{Fetcher, HttpFetcher};
