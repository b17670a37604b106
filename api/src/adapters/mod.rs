//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod mail;
pub mod postgres;
pub mod session;

pub use mail::{FileTemplateStore, SmtpConfig, SmtpMailTransport};
pub use postgres::{
    PostgresReservationRepository, PostgresRoomRepository, PostgresRoomRestrictionRepository,
};
pub use session::{run_session_sweeper, InMemorySessionStore};
