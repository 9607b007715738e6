//! HTTP handlers for agenda endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::adapters::http::vote::TallyResponse;
use crate::application::handlers::agenda::{
    CreateAgendaCommand, CreateAgendaHandler, GetAgendaHandler, GetAgendaQuery,
};
use crate::application::handlers::vote::{GetTallyHandler, GetTallyQuery};
use crate::domain::agenda::AgendaError;
use crate::domain::foundation::AgendaId;

use super::dto::{AgendaResponse, CreateAgendaRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AgendaHandlers {
    create_handler: Arc<CreateAgendaHandler>,
    get_handler: Arc<GetAgendaHandler>,
    tally_handler: Arc<GetTallyHandler>,
}

impl AgendaHandlers {
    pub fn new(
        create_handler: Arc<CreateAgendaHandler>,
        get_handler: Arc<GetAgendaHandler>,
        tally_handler: Arc<GetTallyHandler>,
    ) -> Self {
        Self {
            create_handler,
            get_handler,
            tally_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/agendas - Register an agenda
pub async fn create_agenda(
    State(handlers): State<AgendaHandlers>,
    Json(req): Json<CreateAgendaRequest>,
) -> Response {
    let cmd = CreateAgendaCommand { title: req.title };

    match handlers.create_handler.handle(cmd).await {
        Ok(agenda) => {
            let response: AgendaResponse = agenda.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_agenda_error(e),
    }
}

/// GET /api/agendas/:id - Load an agenda
pub async fn get_agenda(
    State(handlers): State<AgendaHandlers>,
    Path(agenda_id): Path<String>,
) -> Response {
    let agenda_id = match agenda_id.parse::<AgendaId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid agenda ID"),
    };

    match handlers.get_handler.handle(GetAgendaQuery { agenda_id }).await {
        Ok(Some(agenda)) => {
            let response: AgendaResponse = agenda.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => handle_agenda_error(AgendaError::NotFound(agenda_id)),
        Err(e) => handle_agenda_error(e),
    }
}

/// GET /api/agendas/:id/tally - Current tally of the agenda's session
pub async fn get_tally(
    State(handlers): State<AgendaHandlers>,
    Path(agenda_id): Path<String>,
) -> Response {
    let agenda_id = match agenda_id.parse::<AgendaId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid agenda ID"),
    };

    match handlers.tally_handler.handle(GetTallyQuery { agenda_id }).await {
        Ok(report) => {
            let response: TallyResponse = report.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e.code(), e.message()),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_agenda_error(error: AgendaError) -> Response {
    error_response(error.code(), error.message())
}
