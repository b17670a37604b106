//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    DateRange, NewReservation, NewRoomRestriction, Reservation, ReservationId, Room, RoomId,
    RoomRestriction,
};
use crate::error::DomainError;

/// Repository for the room catalog
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find a room by ID
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, DomainError>;

    /// List every room, ordered by ID
    async fn list(&self) -> Result<Vec<Room>, DomainError>;
}

/// Repository for Reservation entities
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation and return it as stored
    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, DomainError>;

    /// Find a reservation by ID
    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;
}

/// Repository for RoomRestriction entities
///
/// Overlap is half-open: a stored `[s1, e1)` overlaps a query `[s2, e2)`
/// iff `s1 < e2 && s2 < e1`.
#[async_trait]
pub trait RoomRestrictionRepository: Send + Sync {
    /// Insert a room restriction and return it as stored
    async fn create(&self, restriction: &NewRoomRestriction) -> Result<RoomRestriction, DomainError>;

    /// Whether any restriction on the room overlaps the range
    async fn has_overlap(&self, room_id: &RoomId, range: &DateRange) -> Result<bool, DomainError>;

    /// Rooms with no restriction overlapping the range, ordered by ID
    async fn rooms_without_overlap(&self, range: &DateRange) -> Result<Vec<Room>, DomainError>;
}
