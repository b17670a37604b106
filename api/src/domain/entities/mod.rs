//! Domain entities
//!
//! Pure domain models representing core booking concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod date_range;
pub mod notification;
pub mod reservation;
pub mod room;
pub mod room_restriction;
pub mod session;

pub use date_range::DateRange;
pub use notification::{MailMessage, NotificationJob};
pub use reservation::{
    GuestInfo, NewReservation, Reservation, ReservationDraft, ReservationId, ReservationSummary,
};
pub use room::{Room, RoomId};
pub use room_restriction::{NewRoomRestriction, RestrictionKind, RoomRestriction};
pub use session::SessionId;
