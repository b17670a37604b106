//! Reservation handlers
//!
//! The booking flow: pick a room, fill in guest details, confirm, then view
//! the summary once. Every step answers with a `WorkflowResponse`.

use axum::{
    extract::{Path, Query, State},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::app::{FormErrors, GuestForm};
use crate::domain::entities::{
    GuestInfo, Reservation, ReservationDraft, ReservationId, ReservationSummary, RoomId, SessionId,
};
use crate::error::{AppError, WorkflowError};
use crate::AppState;

/// Draft as shown on the reservation form
#[derive(Debug, Serialize)]
pub struct DraftView {
    pub room_id: i32,
    pub room_name: String,
    pub start_date: String,
    pub end_date: String,
    pub guest: GuestInfo,
}

impl From<ReservationDraft> for DraftView {
    fn from(draft: ReservationDraft) -> Self {
        Self {
            room_id: draft.room.id.0,
            room_name: draft.room.name,
            start_date: draft.range.start().to_string(),
            end_date: draft.range.end().to_string(),
            guest: draft.guest,
        }
    }
}

/// Outcome of a reservation workflow step
#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    pub message: String,
    #[serde(skip_serializing_if = "FormErrors::is_empty")]
    pub field_errors: FormErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<ReservationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftView>,
    /// Route the visitor should go to next
    pub next: String,
}

impl WorkflowResponse {
    fn accepted(message: impl Into<String>, next: &str) -> Self {
        Self {
            ok: true,
            error_kind: None,
            message: message.into(),
            field_errors: FormErrors::default(),
            reservation_id: None,
            draft: None,
            next: next.to_string(),
        }
    }

    fn with_draft(draft: ReservationDraft) -> Self {
        Self {
            draft: Some(draft.into()),
            ..Self::accepted("Reservation in progress", "/make-reservation")
        }
    }

    fn confirmed(reservation: &Reservation) -> Self {
        Self {
            reservation_id: Some(reservation.id),
            ..Self::accepted("Reservation confirmed", "/reservation-summary")
        }
    }

    pub fn rejected(error: &WorkflowError) -> Self {
        let field_errors = match error {
            WorkflowError::Validation(errors) => errors.clone(),
            _ => FormErrors::default(),
        };

        Self {
            ok: false,
            error_kind: Some(error.kind()),
            message: error.user_message(),
            field_errors,
            reservation_id: None,
            draft: None,
            next: error.next_route().to_string(),
        }
    }
}

/// Query parameters for `/book-room`
#[derive(Debug, Deserialize)]
pub struct BookRoomQuery {
    pub id: i32,
    /// Start date
    pub s: String,
    /// End date
    pub e: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub reservation_id: ReservationId,
    pub room_id: i32,
    pub room_name: String,
    pub start_date: String,
    pub end_date: String,
    pub nights: i64,
    pub guest: GuestInfo,
}

impl From<ReservationSummary> for SummaryResponse {
    fn from(summary: ReservationSummary) -> Self {
        Self {
            reservation_id: summary.reservation_id,
            room_id: summary.room.id.0,
            room_name: summary.room.name,
            start_date: summary.range.start().to_string(),
            end_date: summary.range.end().to_string(),
            nights: summary.range.nights(),
            guest: summary.guest,
        }
    }
}

/// GET /choose-room/:id
///
/// Pick a room from the last availability search.
pub async fn choose_room(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<i32>,
) -> Result<Json<WorkflowResponse>, AppError> {
    let draft = state
        .reservation_service
        .select_searched_room(&session, &RoomId(id))
        .await?;

    Ok(Json(WorkflowResponse::with_draft(draft)))
}

/// GET /book-room?id=&s=&e=
///
/// Pick a room for an explicit range, as linked from the room pages.
pub async fn book_room(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Query(query): Query<BookRoomQuery>,
) -> Result<Json<WorkflowResponse>, AppError> {
    let range = super::availability::parse_range(&query.s, &query.e)?;
    let draft = state
        .reservation_service
        .select_room(&session, &RoomId(query.id), &range)
        .await?;

    Ok(Json(WorkflowResponse::with_draft(draft)))
}

/// GET /make-reservation
pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<WorkflowResponse>, AppError> {
    let draft = state.reservation_service.current_draft(&session).await?;
    Ok(Json(WorkflowResponse::with_draft(draft)))
}

/// POST /make-reservation
///
/// Validate guest details and confirm the draft.
pub async fn post_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<GuestForm>,
) -> Result<Json<WorkflowResponse>, AppError> {
    let reservation = state.reservation_service.confirm(&session, &form).await?;
    Ok(Json(WorkflowResponse::confirmed(&reservation)))
}

/// DELETE /make-reservation
pub async fn abandon_reservation(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<WorkflowResponse>, AppError> {
    state.reservation_service.abandon(&session).await?;
    Ok(Json(WorkflowResponse::accepted(
        "Reservation abandoned",
        "/search-availability",
    )))
}

/// GET /reservation-summary
///
/// Shown once after a successful confirmation.
pub async fn reservation_summary(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = state
        .reservation_service
        .take_summary(&session)
        .await?
        .ok_or(WorkflowError::NoDraft)?;

    Ok(Json(summary.into()))
}
