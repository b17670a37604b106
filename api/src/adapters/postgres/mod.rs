//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod reservation_repo;
pub mod room_repo;
pub mod room_restriction_repo;

#[cfg(test)]
mod integration_tests;

pub use reservation_repo::PostgresReservationRepository;
pub use room_repo::PostgresRoomRepository;
pub use room_restriction_repo::PostgresRoomRestrictionRepository;
