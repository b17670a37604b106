//! Session adapters

pub mod memory;

pub use memory::{run_session_sweeper, InMemorySessionStore};
