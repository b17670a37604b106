//! Reservation domain entities
//!
//! A `ReservationDraft` lives in the visitor's session while the booking form is
//! filled in. Confirming it produces a `Reservation` plus one `RoomRestriction`
//! blocking the room for the stay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DateRange, Room, RoomId};

/// Unique identifier for a reservation, assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub i32);

impl From<i32> for ReservationId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact details entered by the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// In-progress reservation held in the visitor's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub room: Room,
    pub range: DateRange,
    pub guest: GuestInfo,
}

impl ReservationDraft {
    /// Draft for a freshly selected room, guest details still blank
    pub fn new(room: Room, range: DateRange) -> Self {
        Self {
            room,
            range,
            guest: GuestInfo::default(),
        }
    }

    pub fn to_new_reservation(&self) -> NewReservation {
        NewReservation {
            room_id: self.room.id,
            range: self.range,
            guest: self.guest.clone(),
        }
    }
}

/// A confirmed reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room_id: RoomId,
    pub range: DateRange,
    pub guest: GuestInfo,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room_id: RoomId,
    pub range: DateRange,
    pub guest: GuestInfo,
}

/// What the visitor sees once the booking went through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub reservation_id: ReservationId,
    pub room: Room,
    pub range: DateRange,
    pub guest: GuestInfo,
}
