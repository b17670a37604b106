//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    DateRange, MailMessage, NewReservation, NewRoomRestriction, Reservation, ReservationId, Room,
    RoomId, RoomRestriction,
};
use crate::domain::ports::{
    MailTransport, ReservationRepository, RoomRepository, RoomRestrictionRepository,
    TemplateStore,
};
use crate::error::{DomainError, MailError};

fn storage_down() -> DomainError {
    DomainError::Database("connection refused".to_string())
}

// ============================================================================
// In-Memory Room Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the catalog
    pub fn with_rooms(self, rooms: Vec<Room>) -> Self {
        {
            let mut map = self.rooms.write().unwrap();
            for room in rooms {
                map.insert(room.id, room);
            }
        }
        self
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        Ok(self.rooms.read().unwrap().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Room>, DomainError> {
        let mut rooms: Vec<Room> = self.rooms.read().unwrap().values().cloned().collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }
}

// ============================================================================
// In-Memory Reservation Repository
// ============================================================================

pub struct InMemoryReservationRepository {
    reservations: Arc<RwLock<HashMap<ReservationId, Reservation>>>,
    next_id: AtomicI32,
    create_calls: AtomicUsize,
    fail: bool,
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self {
            reservations: Arc::default(),
            next_id: AtomicI32::new(1),
            create_calls: AtomicUsize::new(0),
            fail: false,
        }
    }
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the database were down
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of stored reservations
    pub fn count(&self) -> usize {
        self.reservations.read().unwrap().len()
    }

    /// Number of `create` attempts, successful or not
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Stored copy of a reservation, bypassing fault injection
    pub fn stored(&self, id: &ReservationId) -> Option<Reservation> {
        self.reservations.read().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(storage_down());
        }

        let id = ReservationId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Reservation {
            id,
            room_id: reservation.room_id,
            range: reservation.range,
            guest: reservation.guest.clone(),
            created_at: Utc::now(),
        };
        self.reservations.write().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        if self.fail {
            return Err(storage_down());
        }
        Ok(self.reservations.read().unwrap().get(id).cloned())
    }
}

// ============================================================================
// In-Memory Room Restriction Repository
// ============================================================================

pub struct InMemoryRoomRestrictionRepository {
    rooms: Vec<Room>,
    restrictions: Arc<RwLock<Vec<RoomRestriction>>>,
    next_id: AtomicI32,
    create_calls: AtomicUsize,
    fail_reads: bool,
    fail_inserts: bool,
}

impl InMemoryRoomRestrictionRepository {
    /// Restrictions over the given room catalog
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            restrictions: Arc::default(),
            next_id: AtomicI32::new(1),
            create_calls: AtomicUsize::new(0),
            fail_reads: false,
            fail_inserts: false,
        }
    }

    /// Every call fails as if the database were down
    pub fn failing(rooms: Vec<Room>) -> Self {
        Self {
            fail_reads: true,
            fail_inserts: true,
            ..Self::new(rooms)
        }
    }

    /// Reads work, inserts fail
    pub fn failing_inserts(self) -> Self {
        Self {
            fail_inserts: true,
            ..self
        }
    }

    /// Pre-populate a restriction
    pub fn with_restriction(self, new: NewRoomRestriction) -> Self {
        self.store(&new);
        self
    }

    /// Snapshot of stored restrictions
    pub fn all(&self) -> Vec<RoomRestriction> {
        self.restrictions.read().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn store(&self, new: &NewRoomRestriction) -> RoomRestriction {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = RoomRestriction {
            id,
            reservation_id: new.reservation_id,
            room_id: new.room_id,
            range: new.range,
            kind: new.kind,
        };
        self.restrictions.write().unwrap().push(stored.clone());
        stored
    }

    fn overlaps(&self, room_id: &RoomId, range: &DateRange) -> bool {
        self.restrictions
            .read()
            .unwrap()
            .iter()
            .any(|r| r.room_id == *room_id && r.range.overlaps(range))
    }
}

#[async_trait]
impl RoomRestrictionRepository for InMemoryRoomRestrictionRepository {
    async fn create(&self, restriction: &NewRoomRestriction) -> Result<RoomRestriction, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts {
            return Err(storage_down());
        }
        Ok(self.store(restriction))
    }

    async fn has_overlap(&self, room_id: &RoomId, range: &DateRange) -> Result<bool, DomainError> {
        if self.fail_reads {
            return Err(storage_down());
        }
        Ok(self.overlaps(room_id, range))
    }

    async fn rooms_without_overlap(&self, range: &DateRange) -> Result<Vec<Room>, DomainError> {
        if self.fail_reads {
            return Err(storage_down());
        }
        Ok(self
            .rooms
            .iter()
            .filter(|room| !self.overlaps(&room.id, range))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Mock Mail Transport
// ============================================================================

#[derive(Default)]
pub struct MockMailTransport {
    sent: Arc<RwLock<Vec<MailMessage>>>,
    attempts: AtomicUsize,
    fail_all: bool,
    fail_for: Option<String>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails to connect
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Sends to this recipient are refused
    pub fn failing_for(self, to: &str) -> Self {
        Self {
            fail_for: Some(to.to_string()),
            ..self
        }
    }

    /// Messages accepted so far, in order
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.read().unwrap().clone()
    }

    /// Number of send attempts, successful or not
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(MailError::Connect("connection refused".to_string()));
        }
        if self.fail_for.as_deref() == Some(message.to.as_str()) {
            return Err(MailError::Send("550 mailbox unavailable".to_string()));
        }
        self.sent.write().unwrap().push(message.clone());
        Ok(())
    }
}

// ============================================================================
// In-Memory Template Store
// ============================================================================

#[derive(Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<String, String>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: &str, body: &str) -> Self {
        self.templates.insert(name.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn read_template(&self, name: &str) -> Result<String, DomainError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Template {} not found", name)))
    }
}
