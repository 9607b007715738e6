//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::application::handlers::session::{
    GetSessionHandler, GetSessionQuery, OpenSessionCommand, OpenSessionHandler,
};
use crate::domain::foundation::{AgendaId, SessionId};
use crate::domain::session::{DeadlineMinutes, SessionError};

use super::dto::{OpenSessionRequest, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    open_handler: Arc<OpenSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
}

impl SessionHandlers {
    pub fn new(open_handler: Arc<OpenSessionHandler>, get_handler: Arc<GetSessionHandler>) -> Self {
        Self {
            open_handler,
            get_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Open a voting session for an agenda
pub async fn open_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<OpenSessionRequest>,
) -> Response {
    let agenda_id = match req.agenda_id.parse::<AgendaId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid agenda ID"),
    };

    let deadline_minutes = match req.deadline_minutes.map(DeadlineMinutes::new).transpose() {
        Ok(deadline) => deadline,
        Err(e) => return handle_session_error(e.into()),
    };

    let cmd = OpenSessionCommand {
        agenda_id,
        deadline_minutes,
    };

    match handlers.open_handler.handle(cmd).await {
        Ok(result) => {
            let response: SessionResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/sessions/:id - Load a session with its derived status
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };

    match handlers
        .get_handler
        .handle(GetSessionQuery::ById(session_id))
        .await
    {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_session_error(error: SessionError) -> Response {
    error_response(error.code(), error.message())
}
