//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the notification pipeline.

pub mod availability_service;
pub mod forms;
pub mod notification_queue;
pub mod notification_worker;
pub mod reservation_service;
pub mod reservation_session;

pub use availability_service::AvailabilityService;
pub use forms::{FormErrors, GuestForm};
pub use notification_queue::notification_channel;
pub use notification_worker::NotificationWorker;
pub use reservation_service::{ConfirmationMail, ReservationService};
pub use reservation_session::ReservationSessionStore;
