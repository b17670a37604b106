//! Availability service
//!
//! Answers "is this room free" and "which rooms are free" for a date range.
//! Queries only, no side effects.

use std::sync::Arc;

use crate::domain::entities::{DateRange, Room, RoomId};
use crate::domain::ports::{RoomRepository, RoomRestrictionRepository};
use crate::error::DomainError;

/// Service for availability lookups
pub struct AvailabilityService<RM, RS>
where
    RM: RoomRepository,
    RS: RoomRestrictionRepository,
{
    rooms: Arc<RM>,
    restrictions: Arc<RS>,
}

impl<RM, RS> AvailabilityService<RM, RS>
where
    RM: RoomRepository,
    RS: RoomRestrictionRepository,
{
    pub fn new(rooms: Arc<RM>, restrictions: Arc<RS>) -> Self {
        Self {
            rooms,
            restrictions,
        }
    }

    /// True iff no restriction on the room overlaps the range
    pub async fn is_room_available(
        &self,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<bool, DomainError> {
        let blocked = self.restrictions.has_overlap(room_id, range).await?;
        tracing::debug!(room_id = %room_id, range = %range, available = !blocked, "Checked room availability");
        Ok(!blocked)
    }

    /// Every room free for the whole range, ordered by room ID
    pub async fn find_available_rooms(&self, range: &DateRange) -> Result<Vec<Room>, DomainError> {
        let mut rooms = self.restrictions.rooms_without_overlap(range).await?;
        rooms.sort_by_key(|room| room.id);
        tracing::debug!(range = %range, count = rooms.len(), "Searched availability for all rooms");
        Ok(rooms)
    }

    /// Look up a room, failing with `NotFound` for unknown IDs
    pub async fn room(&self, room_id: &RoomId) -> Result<Room, DomainError> {
        self.rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Room {} not found", room_id)))
    }

    /// The full room catalog
    pub async fn list_rooms(&self) -> Result<Vec<Room>, DomainError> {
        self.rooms.list().await
    }
}
