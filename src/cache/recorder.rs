//! Invocation Recorder Module
//!
//! Wraps any single-argument operation so that every call is transparently
//! counted and its input/output pair archived, without the wrapped operation
//! needing awareness of recording.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::cache::value::Value;
use crate::error::Result;
use crate::store::KeyValueStore;

// == Key Layout ==
/// Suffix of the list holding serialized inputs for an operation.
pub const INPUTS_SUFFIX: &str = ":inputs";
/// Suffix of the list holding serialized outputs for an operation.
pub const OUTPUTS_SUFFIX: &str = ":outputs";

/// Key of the input history list for `op`.
pub fn inputs_key(op: &str) -> String {
    format!("{op}{INPUTS_SUFFIX}")
}

/// Key of the output history list for `op`.
pub fn outputs_key(op: &str) -> String {
    format!("{op}{OUTPUTS_SUFFIX}")
}

// == Recorder ==
/// Counts invocations and archives input/output pairs per operation name.
///
/// Counters live under the operation name itself; histories under
/// `<op>:inputs` and `<op>:outputs`. Each recorded call runs under a lock
/// scoped to its operation name, so the two history appends and the counter
/// increment form one atomic logical step: the Nth input and Nth output
/// always belong to the same call, even with concurrent callers. Different
/// operations never contend on a shared lock.
#[derive(Debug)]
pub struct Recorder<S> {
    store: Arc<S>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: KeyValueStore> Recorder<S> {
    // == Constructor ==
    /// Creates a recorder over the given store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the lock guarding `op`, creating it on first use.
    ///
    /// The map only holds `Arc`s, so a poisoned map lock cannot leave it in
    /// an inconsistent state; recover the guard instead of failing.
    fn op_lock(&self, op: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(op.to_string()).or_default())
    }

    // == Record ==
    /// Invokes `call` as one recorded invocation of `op`.
    ///
    /// Under the per-operation lock:
    /// 1. the argument is serialized to its canonical byte rendering,
    /// 2. the serialized form is appended to the input history,
    /// 3. `call` is invoked with the serialized form (the wrapped operation
    ///    consumes exactly what the history shows),
    /// 4. the result's rendering is appended to the output history,
    /// 5. the invocation counter is incremented by one.
    ///
    /// The call's own result is returned to the caller. If `call` fails, the
    /// error propagates and neither the output append nor the increment
    /// happens.
    pub fn record<T, F>(&self, op: &str, arg: &Value, call: F) -> Result<T>
    where
        T: fmt::Display,
        F: FnOnce(&[u8]) -> Result<T>,
    {
        let lock = self.op_lock(op);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let serialized = arg.encode();
        self.store.rpush(&inputs_key(op), &serialized)?;

        let result = call(&serialized)?;

        self.store
            .rpush(&outputs_key(op), result.to_string().as_bytes())?;
        let count = self.store.incr(op)?;

        debug!(op, count, "recorded invocation");
        Ok(result)
    }

    // == Wrap ==
    /// Wraps `call` as a reusable operation named `op`.
    ///
    /// The returned wrapper exposes the same call contract as the underlying
    /// operation; every invocation goes through [`record`](Recorder::record).
    /// The operation itself needs no awareness of recording.
    pub fn wrap<T, F>(&self, op: &str, call: F) -> Recorded<'_, S, F>
    where
        T: fmt::Display,
        F: Fn(&[u8]) -> Result<T>,
    {
        Recorded {
            recorder: self,
            op: op.to_string(),
            call,
        }
    }

    // == Call Count ==
    /// Number of recorded invocations of `op`. An operation that was never
    /// called reports zero.
    pub fn call_count(&self, op: &str) -> Result<i64> {
        match self.store.get(op)? {
            Some(bytes) => crate::cache::value::decode::int(bytes),
            None => Ok(0),
        }
    }

    /// Shared handle to the backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

// == Recorded Operation ==
/// An operation wrapped with counting and history recording.
///
/// Created by [`Recorder::wrap`]; each [`call`](Recorded::call) is one
/// recorded invocation of the operation.
#[derive(Debug)]
pub struct Recorded<'r, S, F> {
    recorder: &'r Recorder<S>,
    op: String,
    call: F,
}

impl<S, T, F> Recorded<'_, S, F>
where
    S: KeyValueStore,
    T: fmt::Display,
    F: Fn(&[u8]) -> Result<T>,
{
    /// Invokes the wrapped operation, recording the call.
    pub fn call(&self, arg: &Value) -> Result<T> {
        self.recorder.record(&self.op, arg, &self.call)
    }

    /// The operation name the wrapper records under.
    pub fn op(&self) -> &str {
        &self.op
    }
}
