//! Report - a point-in-time summary of a session's canvass.
//!
//! Reports are derived on demand and never persisted. [`PublishedReport`]
//! is the wire shape sent to the message broker once a session closes.

use serde::{Deserialize, Serialize};

use super::{Canvass, Outcome};
use crate::domain::foundation::{AgendaId, SessionId, Timestamp};
use crate::domain::session::Session;

/// Tally snapshot for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub outcome: Outcome,
    pub total_votes: u64,
    pub affirmative_votes: u64,
    pub negative_votes: u64,
    pub agenda_id: AgendaId,
    pub session_id: SessionId,
    pub opening_time: Timestamp,
    pub closing_time: Timestamp,
}

impl Report {
    /// Builds a report from a session and the canvass it references.
    pub fn snapshot(session: &Session, canvass: &Canvass) -> Self {
        Self {
            title: canvass.title().to_string(),
            outcome: canvass.outcome(),
            total_votes: canvass.total_votes(),
            affirmative_votes: canvass.affirmative_votes(),
            negative_votes: canvass.negative_votes(),
            agenda_id: *session.agenda_id(),
            session_id: *session.id(),
            opening_time: *session.opening_time(),
            closing_time: *session.closing_time(),
        }
    }

    /// The payload published to the results destination.
    pub fn to_published(&self) -> PublishedReport {
        PublishedReport {
            title: self.title.clone(),
            outcome: self.outcome,
            total_votes: self.total_votes,
            affirmative_votes: self.affirmative_votes,
            negative_votes: self.negative_votes,
            agenda_id: self.agenda_id,
            session_id: self.session_id,
        }
    }
}

/// Wire format of a final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedReport {
    pub title: String,
    pub outcome: Outcome,
    pub total_votes: u64,
    pub affirmative_votes: u64,
    pub negative_votes: u64,
    pub agenda_id: AgendaId,
    pub session_id: SessionId,
}
