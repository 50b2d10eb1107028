//! Replay Module
//!
//! Reconstructs and presents the ordered call history recorded for an
//! operation.

use std::fmt;
use std::sync::Arc;

use crate::cache::recorder::{inputs_key, outputs_key};
use crate::error::{CacheError, Result};
use crate::store::KeyValueStore;

// == Replayer ==
/// Rebuilds recorded call histories from the store.
#[derive(Debug)]
pub struct Replayer<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> Replayer<S> {
    /// Creates a replayer over the given store handle.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    // == History ==
    /// Returns every recorded (input, output) pair for `op`, in call order.
    ///
    /// Entries are decoded lossily for presentation. Unequal history lengths
    /// can only come from a construction error in recording and surface as
    /// [`CacheError::HistoryCorruption`].
    pub fn history(&self, op: &str) -> Result<Vec<(String, String)>> {
        let inputs = self.store.lrange(&inputs_key(op), 0, -1)?;
        let outputs = self.store.lrange(&outputs_key(op), 0, -1)?;

        if inputs.len() != outputs.len() {
            return Err(CacheError::HistoryCorruption {
                op: op.to_string(),
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }

        Ok(inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| {
                (
                    String::from_utf8_lossy(&input).into_owned(),
                    String::from_utf8_lossy(&output).into_owned(),
                )
            })
            .collect())
    }

    // == Report ==
    /// Builds the displayable replay report for `op`.
    pub fn report(&self, op: &str) -> Result<ReplayReport> {
        Ok(ReplayReport {
            op: op.to_string(),
            calls: self.history(op)?,
        })
    }
}

// == Replay Report ==
/// Ordered call history of one operation, ready for presentation.
///
/// Displays as a header with the call count followed by one line per call:
///
/// ```text
/// Cache::store was called 2 times:
/// Cache::store(hello) -> 4a3f...
/// Cache::store(42) -> 91bc...
/// ```
#[derive(Debug, Clone)]
pub struct ReplayReport {
    op: String,
    calls: Vec<(String, String)>,
}

impl ReplayReport {
    /// Operation name the report covers.
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.len()
    }

    /// The recorded (input, output) pairs, in call order.
    pub fn calls(&self) -> &[(String, String)] {
        &self.calls
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.op, self.calls.len())?;
        for (input, output) in &self.calls {
            writeln!(f, "{}({}) -> {}", self.op, input, output)?;
        }
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::recorder::Recorder;
    use crate::cache::value::Value;
    use crate::store::MemoryStore;

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_history_pairs_in_call_order() {
        let store = store();
        let rec = Recorder::new(Arc::clone(&store));

        rec.record("op", &Value::from("a"), |_| Ok("1".to_string()))
            .unwrap();
        rec.record("op", &Value::from("b"), |_| Ok("2".to_string()))
            .unwrap();

        let history = Replayer::new(store).history("op").unwrap();
        assert_eq!(
            history,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_report_display_format() {
        let store = store();
        let rec = Recorder::new(Arc::clone(&store));

        rec.record("Cache::store", &Value::from("hello"), |_| {
            Ok("key-1".to_string())
        })
        .unwrap();

        let report = Replayer::new(store).report("Cache::store").unwrap();
        let rendered = report.to_string();

        assert!(rendered.starts_with("Cache::store was called 1 times:\n"));
        assert!(rendered.contains("Cache::store(hello) -> key-1"));
    }

    #[test]
    fn test_report_zero_calls() {
        let report = Replayer::new(store()).report("never").unwrap();

        assert_eq!(report.count(), 0);
        assert_eq!(report.to_string(), "never was called 0 times:\n");
    }

    #[test]
    fn test_history_corruption_detected() {
        let store = store();
        // Bypass the recorder and push an unpaired input
        store.rpush(&inputs_key("op"), b"orphan").unwrap();

        let result = Replayer::new(store).history("op");
        assert!(matches!(
            result,
            Err(CacheError::HistoryCorruption {
                inputs: 1,
                outputs: 0,
                ..
            })
        ));
    }
}
