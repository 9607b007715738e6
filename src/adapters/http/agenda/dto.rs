//! DTOs for agenda endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::agenda::Agenda;
use crate::domain::foundation::AgendaId;

/// Request to register an agenda.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgendaRequest {
    pub title: String,
}

/// An agenda as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaResponse {
    pub id: AgendaId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<Agenda> for AgendaResponse {
    fn from(agenda: Agenda) -> Self {
        Self {
            id: *agenda.id(),
            title: agenda.title().to_string(),
            created_at: *agenda.created_at().as_datetime(),
        }
    }
}
