//! SeaORM entities
//!
//! Table mappings for the bookings schema (see `migrations/`).

pub mod reservations;
pub mod room_restrictions;
pub mod rooms;
