//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod availability;
pub mod reservation;

pub use availability::{list_rooms, search_availability, search_availability_json};
pub use reservation::{
    abandon_reservation, book_room, choose_room, get_reservation, post_reservation,
    reservation_summary, WorkflowResponse,
};
