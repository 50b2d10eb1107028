//! Cache Module
//!
//! The instrumented scalar cache: value encoding, recorded stores, and
//! call-history replay.

mod recorder;
mod replay;
mod scalar;
mod value;


// Re-export public types
pub use recorder::{inputs_key, outputs_key, Recorded, Recorder, INPUTS_SUFFIX, OUTPUTS_SUFFIX};
pub use replay::{ReplayReport, Replayer};
pub use scalar::{Cache, STORE_OP};
pub use value::{decode, Value};
