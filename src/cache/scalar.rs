//! Scalar Cache Module
//!
//! Stores scalar/byte values under freshly minted random keys and retrieves
//! them through caller-supplied decoders. Every store goes through the
//! invocation recorder, so call counts and histories come for free.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::cache::recorder::Recorder;
use crate::cache::replay::{Replayer, ReplayReport};
use crate::cache::value::{decode, Value};
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Operation Names ==
/// Recorded operation name for [`Cache::store`].
pub const STORE_OP: &str = "Cache::store";

// == Cache ==
/// Type-erasing scalar cache over a key-value store.
///
/// The store handle is injected at construction and construction has no side
/// effects; clearing the backing store is an explicit, destructive
/// [`reset`](Cache::reset) call. Instances are cheap to share behind an
/// `Arc` and safe under concurrent callers.
#[derive(Debug)]
pub struct Cache<S> {
    store: Arc<S>,
    recorder: Recorder<S>,
}

impl<S: KeyValueStore> Cache<S> {
    // == Constructor ==
    /// Creates a cache over the given store handle.
    pub fn new(store: Arc<S>) -> Self {
        let recorder = Recorder::new(Arc::clone(&store));
        Self { store, recorder }
    }

    // == Store ==
    /// Stores a value under a freshly minted random key and returns the key.
    ///
    /// The key is a UUIDv4 rendered as a string: unpredictable before the
    /// call returns, with negligible collision probability. The call is
    /// recorded under [`STORE_OP`]; per the recording contract, the bytes
    /// written to the store are the value's serialized form, which is also
    /// what the history archives.
    pub fn store(&self, value: impl Into<Value>) -> Result<String> {
        let value = value.into();
        let store = Arc::clone(&self.store);

        self.recorder.record(STORE_OP, &value, |serialized| {
            let key = Uuid::new_v4().to_string();
            store.set(&key, serialized)?;
            debug!(%key, "stored value");
            Ok(key)
        })
    }

    // == Get ==
    /// Reads the bytes at `key` and applies `decoder`.
    ///
    /// A miss is `Ok(None)`, never a default substitute value, so an absent
    /// key can never be confused with a stored zero or empty string. Decoder
    /// failures propagate to the caller.
    pub fn get<T>(&self, key: &str, decoder: impl FnOnce(Vec<u8>) -> Result<T>) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(decoder(bytes)?)),
            None => Ok(None),
        }
    }

    /// Reads the raw bytes at `key` without decoding.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key)
    }

    /// [`get`](Cache::get) parameterized with the UTF-8 decoder.
    pub fn get_text(&self, key: &str) -> Result<Option<String>> {
        self.get(key, decode::text)
    }

    /// [`get`](Cache::get) parameterized with the integer decoder.
    /// Malformed content is a caller-visible [`CacheError::DecodeFailure`].
    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get(key, decode::int)
    }

    /// [`get`](Cache::get) parameterized with the float decoder.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get(key, decode::float)
    }

    /// Like [`get`](Cache::get), but a miss is a [`CacheError::KeyNotFound`]
    /// error, for callers that require the key to be present.
    pub fn get_required<T>(
        &self,
        key: &str,
        decoder: impl FnOnce(Vec<u8>) -> Result<T>,
    ) -> Result<T> {
        self.get(key, decoder)?
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))
    }

    // == Instrumentation ==
    /// Number of recorded invocations of `op`.
    pub fn call_count(&self, op: &str) -> Result<i64> {
        self.recorder.call_count(op)
    }

    /// Builds the replay report for `op`: every recorded (input, output)
    /// pair, in call order.
    pub fn replay(&self, op: &str) -> Result<ReplayReport> {
        Replayer::new(Arc::clone(&self.store)).report(op)
    }

    // == Reset ==
    /// Clears the entire backing store, histories and counters included.
    ///
    /// Destructive: on a shared store this wipes every session's data, which
    /// is why it is an explicit operation and never a construction side
    /// effect.
    pub fn reset(&self) -> Result<()> {
        self.store.flush_all()
    }

    /// Shared handle to the backing store.
    pub fn store_handle(&self) -> &Arc<S> {
        &self.store
    }
}
