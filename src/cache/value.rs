//! Scalar Value Module
//!
//! The value categories the store understands natively, plus the decoders
//! callers hand back to reads.

use std::fmt;

use crate::error::{CacheError, Result};

// == Value ==
/// A scalar or byte payload accepted by the cache.
///
/// The store itself is type-unaware: every variant is written as its byte
/// rendering (text and bytes verbatim, numbers as decimal text), and the
/// caller supplies a matching decoder when reading back.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Value {
    /// Canonical byte rendering of the value, as written to the store.
    ///
    /// Deterministic for a given value; this is also the serialized input
    /// form archived by the invocation recorder.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Value::Text(s) => s.clone().into_bytes(),
            Value::Bytes(b) => b.clone(),
            Value::Int(i) => i.to_string().into_bytes(),
            Value::Float(f) => f.to_string().into_bytes(),
        }
    }
}

impl fmt::Display for Value {
    /// Lossy textual rendering, used for history presentation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

// == Decoders ==
/// Caller-supplied decoders for reading stored bytes back into typed values.
///
/// Decoder failures surface as [`CacheError::DecodeFailure`]; they are never
/// absorbed into a default value.
pub mod decode {
    use super::*;

    /// UTF-8 text decoder.
    pub fn text(bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes)
            .map_err(|e| CacheError::DecodeFailure(format!("invalid UTF-8: {e}")))
    }

    /// Decimal integer decoder.
    pub fn int(bytes: Vec<u8>) -> Result<i64> {
        let s = text(bytes)?;
        s.parse::<i64>()
            .map_err(|e| CacheError::DecodeFailure(format!("not an integer ({s:?}): {e}")))
    }

    /// Decimal float decoder.
    pub fn float(bytes: Vec<u8>) -> Result<f64> {
        let s = text(bytes)?;
        s.parse::<f64>()
            .map_err(|e| CacheError::DecodeFailure(format!("not a float ({s:?}): {e}")))
    }
}
