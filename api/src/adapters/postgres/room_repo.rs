//! PostgreSQL adapter for RoomRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::entities::{Room, RoomId};
use crate::domain::ports::RoomRepository;
use crate::entity::rooms;
use crate::error::DomainError;

/// PostgreSQL implementation of RoomRepository
pub struct PostgresRoomRepository {
    db: DatabaseConnection,
}

impl PostgresRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, DomainError> {
        let result = rooms::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Room>, DomainError> {
        let results = rooms::Entity::find()
            .order_by_asc(rooms::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Room {
            id: RoomId(model.id),
            name: model.room_name,
        }
    }
}
