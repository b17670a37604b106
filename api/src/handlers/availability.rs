//! Availability handlers
//!
//! Room catalog and availability searches.

use axum::{extract::State, http::StatusCode, Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{DateRange, Room, RoomId, SessionId};
use crate::error::{AppError, DomainError, WorkflowError};
use crate::AppState;

/// A room as shown to visitors
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: i32,
    pub name: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.0,
            name: room.name,
        }
    }
}

/// Search form posted from the availability page
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub start_date: String,
    pub end_date: String,
    pub rooms: Vec<RoomResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub next: String,
}

/// Single-room check posted by the room pages
#[derive(Debug, Deserialize)]
pub struct AvailabilityJsonForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub room_id: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityJsonResponse {
    pub ok: bool,
    pub message: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl AvailabilityJsonResponse {
    fn for_form(form: &AvailabilityJsonForm, ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
            room_id: form.room_id.clone(),
            start_date: form.start.clone(),
            end_date: form.end.clone(),
        }
    }
}

pub(crate) fn parse_range(start: &str, end: &str) -> Result<DateRange, WorkflowError> {
    DateRange::parse(start, end).map_err(|e| match e {
        DomainError::InvalidRange(msg) => WorkflowError::InvalidRange(msg),
        other => WorkflowError::InvalidRange(other.to_string()),
    })
}

fn room_lookup_failure(
    form: &AvailabilityJsonForm,
    room_id: &RoomId,
    e: DomainError,
) -> (StatusCode, AvailabilityJsonResponse) {
    match e {
        DomainError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            AvailabilityJsonResponse::for_form(form, false, e.to_string()),
        ),
        other => {
            tracing::error!(room_id = %room_id, error = %other, "Room lookup failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                AvailabilityJsonResponse::for_form(form, false, "Error querying database"),
            )
        }
    }
}

/// GET /rooms
///
/// The room catalog, ordered by ID.
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomResponse>>, AppError> {
    let rooms = state.availability_service.list_rooms().await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// POST /search-availability
///
/// Every room free for the whole range. The range is remembered so the
/// visitor can pick a room with `/choose-room/:id`.
pub async fn search_availability(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResponse>, AppError> {
    let range = parse_range(&form.start, &form.end)?;
    let rooms = state.reservation_service.search(&session, &range).await?;

    let message = rooms.is_empty().then(|| "No availability".to_string());
    Ok(Json(SearchResponse {
        start_date: range.start().to_string(),
        end_date: range.end().to_string(),
        rooms: rooms.into_iter().map(RoomResponse::from).collect(),
        message,
        next: "/choose-room/:id".to_string(),
    }))
}

/// POST /search-availability-json
///
/// Whether one room is free for the range. Always answers with the same
/// JSON shape; the status code tells failures apart.
pub async fn search_availability_json(
    State(state): State<AppState>,
    Form(form): Form<AvailabilityJsonForm>,
) -> (StatusCode, Json<AvailabilityJsonResponse>) {
    let range = match parse_range(&form.start, &form.end) {
        Ok(range) => range,
        Err(e) => {
            let body = AvailabilityJsonResponse::for_form(&form, false, e.user_message());
            return (StatusCode::BAD_REQUEST, Json(body));
        }
    };
    let room_id = match form.room_id.trim().parse::<i32>() {
        Ok(id) => RoomId(id),
        Err(_) => {
            let body = AvailabilityJsonResponse::for_form(&form, false, "Invalid room ID");
            return (StatusCode::BAD_REQUEST, Json(body));
        }
    };

    if let Err(e) = state.availability_service.room(&room_id).await {
        let (status, body) = room_lookup_failure(&form, &room_id, e);
        return (status, Json(body));
    }

    match state
        .availability_service
        .is_room_available(&room_id, &range)
        .await
    {
        Ok(available) => {
            let message = if available { "Available" } else { "Not available" };
            (
                StatusCode::OK,
                Json(AvailabilityJsonResponse::for_form(&form, available, message)),
            )
        }
        Err(e) => {
            tracing::error!(room_id = %room_id, error = %e, "Availability query failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(AvailabilityJsonResponse::for_form(
                    &form,
                    false,
                    "Error querying database",
                )),
            )
        }
    }
}
