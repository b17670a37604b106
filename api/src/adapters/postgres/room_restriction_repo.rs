//! PostgreSQL adapter for RoomRestrictionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{
    DateRange, NewRoomRestriction, ReservationId, RestrictionKind, Room, RoomId, RoomRestriction,
};
use crate::domain::ports::RoomRestrictionRepository;
use crate::entity::{room_restrictions, rooms};
use crate::error::DomainError;

/// PostgreSQL implementation of RoomRestrictionRepository
pub struct PostgresRoomRestrictionRepository {
    db: DatabaseConnection,
}

impl PostgresRoomRestrictionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoomRestrictionRepository for PostgresRoomRestrictionRepository {
    async fn create(&self, restriction: &NewRoomRestriction) -> Result<RoomRestriction, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = room_restrictions::ActiveModel {
            start_date: Set(restriction.range.start()),
            end_date: Set(restriction.range.end()),
            room_id: Set(restriction.room_id.0),
            reservation_id: Set(restriction.reservation_id.map(|id| id.0)),
            restriction_id: Set(restriction.kind.id()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        RoomRestriction::try_from(result)
    }

    async fn has_overlap(&self, room_id: &RoomId, range: &DateRange) -> Result<bool, DomainError> {
        // Half-open overlap: existing.start < query.end AND query.start < existing.end
        let count = room_restrictions::Entity::find()
            .filter(room_restrictions::Column::RoomId.eq(room_id.0))
            .filter(room_restrictions::Column::StartDate.lt(range.end()))
            .filter(room_restrictions::Column::EndDate.gt(range.start()))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn rooms_without_overlap(&self, range: &DateRange) -> Result<Vec<Room>, DomainError> {
        let blocked_rooms = Query::select()
            .column(room_restrictions::Column::RoomId)
            .from(room_restrictions::Entity)
            .and_where(Expr::col(room_restrictions::Column::StartDate).lt(range.end()))
            .and_where(Expr::col(room_restrictions::Column::EndDate).gt(range.start()))
            .to_owned();

        let results = rooms::Entity::find()
            .filter(rooms::Column::Id.not_in_subquery(blocked_rooms))
            .order_by_asc(rooms::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<room_restrictions::Model> for RoomRestriction {
    type Error = DomainError;

    fn try_from(model: room_restrictions::Model) -> Result<Self, Self::Error> {
        let kind = RestrictionKind::from_id(model.restriction_id).ok_or_else(|| {
            DomainError::Database(format!("Unknown restriction kind {}", model.restriction_id))
        })?;

        Ok(RoomRestriction {
            id: model.id,
            reservation_id: model.reservation_id.map(ReservationId),
            room_id: RoomId(model.room_id),
            range: DateRange::new(model.start_date, model.end_date)?,
            kind,
        })
    }
}
