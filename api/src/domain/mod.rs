//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing core booking concepts
//! - `ports`: Trait definitions for storage, sessions, mail and templates

pub mod entities;
pub mod ports;
