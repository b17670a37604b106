//! Room restriction domain entity
//!
//! A restriction blocks a room for a date range. Availability is the absence of
//! any overlapping restriction, whatever its kind.

use serde::{Deserialize, Serialize};

use super::{DateRange, ReservationId, RoomId};

/// Why a room is blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    /// Created alongside a confirmed reservation
    Reservation,
    /// Set by the owner, no reservation attached
    OwnerBlock,
}

impl RestrictionKind {
    /// Row id in the `restrictions` lookup table
    pub fn id(self) -> i32 {
        match self {
            RestrictionKind::Reservation => 1,
            RestrictionKind::OwnerBlock => 2,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(RestrictionKind::Reservation),
            2 => Some(RestrictionKind::OwnerBlock),
            _ => None,
        }
    }
}

/// A persisted block on a room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomRestriction {
    pub id: i32,
    pub reservation_id: Option<ReservationId>,
    pub room_id: RoomId,
    pub range: DateRange,
    pub kind: RestrictionKind,
}

/// Data needed to create a new room restriction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomRestriction {
    pub reservation_id: Option<ReservationId>,
    pub room_id: RoomId,
    pub range: DateRange,
    pub kind: RestrictionKind,
}

impl NewRoomRestriction {
    /// The restriction that accompanies a confirmed reservation
    pub fn for_reservation(reservation_id: ReservationId, room_id: RoomId, range: DateRange) -> Self {
        Self {
            reservation_id: Some(reservation_id),
            room_id,
            range,
            kind: RestrictionKind::Reservation,
        }
    }
}
