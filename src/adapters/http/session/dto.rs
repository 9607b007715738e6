//! DTOs for session endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::session::{OpenSessionResult, SessionView};
use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, SessionId, SessionStatus};
use crate::domain::session::Session;

/// Request to open a voting session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub agenda_id: String,
    /// Voting window in minutes; the configured default when absent.
    pub deadline_minutes: Option<u32>,
}

/// Agenda summary embedded in session responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaSummary {
    pub id: AgendaId,
    pub title: String,
}

/// A session as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: SessionId,
    pub agenda: AgendaSummary,
    pub opening_time: DateTime<Utc>,
    pub closing_time: DateTime<Utc>,
    pub status: SessionStatus,
    pub published: bool,
}

impl SessionResponse {
    fn build(session: &Session, agenda: &Agenda, status: SessionStatus) -> Self {
        Self {
            id: *session.id(),
            agenda: AgendaSummary {
                id: *agenda.id(),
                title: agenda.title().to_string(),
            },
            opening_time: *session.opening_time().as_datetime(),
            closing_time: *session.closing_time().as_datetime(),
            status,
            published: session.is_published(),
        }
    }
}

impl From<OpenSessionResult> for SessionResponse {
    fn from(result: OpenSessionResult) -> Self {
        Self::build(&result.session, &result.agenda, result.session.status())
    }
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self::build(&view.session, &view.agenda, view.status)
    }
}
