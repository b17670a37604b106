//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Mocks are hand-written in-memory port implementations with switches for
//! fault injection (`failing`, `failing_inserts`, `failing_for`) and call
//! counters so tests can assert what was attempted, not only what succeeded.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
