//! Shared error body and status mapping for all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// HTTP status for a domain error code.
///
/// Rule violations by the caller are 409 (conflicting state) or 422
/// (well-formed but unacceptable); collaborator outages are 503.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::AgendaNotFound | ErrorCode::SessionNotFound | ErrorCode::CanvassNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::SessionAlreadyOpen | ErrorCode::AlreadyVoted => StatusCode::CONFLICT,
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidStateTransition
        | ErrorCode::MemberIneligible
        | ErrorCode::SessionClosed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::EligibilityUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::SerializationFailed
        | ErrorCode::PublishFailed
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds the error response for a domain error code.
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> Response {
    let status = status_for(code);
    let message = message.into();
    if status.is_server_error() {
        tracing::error!(%code, %message, "Request failed");
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

/// 400 for requests whose shape is wrong (unparseable IDs and the like).
pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}
