//! TTL Sweep Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory backend. Reads already treat expired entries as absent; this
//! task reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::MemoryStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. The store synchronizes internally, so the sweep never
/// blocks other callers for longer than one pass.
///
/// # Arguments
/// * `store` - Shared store handle
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(store: Arc<MemoryStore>, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match store.sweep_expired() {
                Ok(removed) if removed > 0 => {
                    info!("TTL sweep: removed {} expired entries", removed);
                }
                Ok(_) => {
                    debug!("TTL sweep: no expired entries found");
                }
                Err(e) => {
                    warn!("TTL sweep failed: {}", e);
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyValueStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let store = Arc::new(MemoryStore::new());

        store.set_ex("expire_soon", b"value", 1).unwrap();

        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(store.len().unwrap(), 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let store = Arc::new(MemoryStore::new());

        store.set_ex("long_lived", b"value", 3600).unwrap();

        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.get("long_lived").unwrap(), Some(b"value".to_vec()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let store = Arc::new(MemoryStore::new());

        let handle = spawn_sweep_task(store, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
