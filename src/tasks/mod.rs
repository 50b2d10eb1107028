//! Background Tasks Module
//!
//! Periodic maintenance for the in-memory backend.

mod sweep;

pub use sweep::spawn_sweep_task;
