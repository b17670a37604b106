//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use crate::app::GuestForm;
use crate::domain::entities::{DateRange, NotificationJob, ReservationDraft, Room, RoomId};

/// The two seeded rooms
pub fn test_rooms() -> Vec<Room> {
    vec![
        Room {
            id: RoomId(1),
            name: "General's Quarters".to_string(),
        },
        Room {
            id: RoomId(2),
            name: "Major's Suite".to_string(),
        },
    ]
}

/// A month-long stay far enough in the future to never be in the past
pub fn test_range() -> DateRange {
    DateRange::parse("2050-01-01", "2050-02-01").unwrap()
}

/// A fresh draft for room 1 over `test_range()`
pub fn test_draft() -> ReservationDraft {
    ReservationDraft::new(test_rooms().remove(0), test_range())
}

/// A guest form that passes validation
pub fn test_guest_form() -> GuestForm {
    GuestForm {
        first_name: "adria".to_string(),
        last_name: "lopez".to_string(),
        email: "adria@lopez.es".to_string(),
        phone: "66582".to_string(),
    }
}

/// A templated confirmation job
pub fn test_job() -> NotificationJob {
    NotificationJob {
        to: "adria@lopez.es".to_string(),
        from: "me@here.com".to_string(),
        subject: "Reservation Confirmation".to_string(),
        template: Some("basic.html".to_string()),
        body: "<strong>Reservation Confirmation</strong>".to_string(),
    }
}
