//! PostgreSQL adapter for ReservationRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::entities::{DateRange, GuestInfo, NewReservation, Reservation, ReservationId, RoomId};
use crate::domain::ports::ReservationRepository;
use crate::entity::reservations;
use crate::error::DomainError;

/// PostgreSQL implementation of ReservationRepository
pub struct PostgresReservationRepository {
    db: DatabaseConnection,
}

impl PostgresReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn create(&self, reservation: &NewReservation) -> Result<Reservation, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = reservations::ActiveModel {
            first_name: Set(reservation.guest.first_name.clone()),
            last_name: Set(reservation.guest.last_name.clone()),
            email: Set(reservation.guest.email.clone()),
            phone: Set(reservation.guest.phone.clone()),
            start_date: Set(reservation.range.start()),
            end_date: Set(reservation.range.end()),
            room_id: Set(reservation.room_id.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Reservation::try_from(result)
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        let result = reservations::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(Reservation::try_from).transpose()
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<reservations::Model> for Reservation {
    type Error = DomainError;

    fn try_from(model: reservations::Model) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: ReservationId(model.id),
            room_id: RoomId(model.room_id),
            range: DateRange::new(model.start_date, model.end_date)?,
            guest: GuestInfo {
                first_name: model.first_name,
                last_name: model.last_name,
                email: model.email,
                phone: model.phone,
            },
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}
