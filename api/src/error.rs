//! Unified error types for the Bookings API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and storage errors
//! - `MailError`: Outbound mail transport errors
//! - `WorkflowError`: Reservation workflow rejections
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::app::forms::FormErrors;
use crate::domain::entities::{DateRange, RoomId};

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Mail transport errors
///
/// Never reach a visitor: the notification worker logs them and drops the job.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Could not connect to mail server: {0}")]
    Connect(String),

    #[error("Could not send mail: {0}")]
    Send(String),

    #[error("Invalid mail message: {0}")]
    InvalidMessage(String),
}

/// Which storage step of the confirmation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceStage {
    AvailabilityCheck,
    Reservation,
    RoomRestriction,
}

impl std::fmt::Display for PersistenceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceStage::AvailabilityCheck => write!(f, "availability check"),
            PersistenceStage::Reservation => write!(f, "reservation"),
            PersistenceStage::RoomRestriction => write!(f, "room restriction"),
        }
    }
}

/// Reasons the reservation workflow rejects a transition
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("The form has errors")]
    Validation(FormErrors),

    #[error("Room {room_id} is not available for {range}")]
    RoomUnavailable { room_id: RoomId, range: DateRange },

    #[error("Could not save the {stage}: {source}")]
    Persistence {
        stage: PersistenceStage,
        #[source]
        source: DomainError,
    },

    #[error("No reservation in progress")]
    NoDraft,

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Storage error: {0}")]
    Storage(#[from] DomainError),
}

impl WorkflowError {
    /// Stable machine-readable tag for the outcome body
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::InvalidRange(_) => "invalid_range",
            WorkflowError::Validation(_) => "validation",
            WorkflowError::RoomUnavailable { .. } => "room_unavailable",
            WorkflowError::Persistence { .. } => "persistence",
            WorkflowError::NoDraft | WorkflowError::RoomNotFound(_) => "not_found",
            WorkflowError::Storage(_) => "storage",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WorkflowError::InvalidRange(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WorkflowError::RoomUnavailable { .. } => StatusCode::CONFLICT,
            WorkflowError::NoDraft | WorkflowError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            WorkflowError::Persistence { .. } | WorkflowError::Storage(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    /// Where the visitor should go next
    pub fn next_route(&self) -> &'static str {
        match self {
            WorkflowError::Validation(_) | WorkflowError::Persistence { .. } => "/make-reservation",
            _ => "/search-availability",
        }
    }

    /// Message safe to show to the visitor
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Persistence { .. } | WorkflowError::Storage(_) => {
                "We could not save your reservation right now, please try again".to_string()
            }
            WorkflowError::NoDraft => "Can't get reservation from session".to_string(),
            other => other.to_string(),
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Workflow(#[from] WorkflowError),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Workflow(e) => {
                if let WorkflowError::Persistence { source, .. } | WorkflowError::Storage(source) =
                    e
                {
                    tracing::error!(error = %source, kind = e.kind(), "Reservation workflow storage failure");
                }
                return (e.status(), Json(crate::handlers::WorkflowResponse::rejected(e)))
                    .into_response();
            }
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::InvalidRange(msg)) => (
                StatusCode::BAD_REQUEST,
                "Invalid date range",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service unavailable",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
