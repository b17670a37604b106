//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod mail;
pub mod repositories;
pub mod session;

pub use mail::{MailTransport, TemplateStore};
pub use repositories::{ReservationRepository, RoomRepository, RoomRestrictionRepository};
pub use session::{LoadedSession, SessionStore};
