//! DTOs for vote and tally endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::vote::CastVoteResult;
use crate::domain::canvass::{Outcome, Report};
use crate::domain::foundation::{AgendaId, SessionId, VoteChoice, VoteId};

/// Request to cast a vote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub member_id: String,
    pub session_id: String,
    pub choice: VoteChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSessionSummary {
    pub id: SessionId,
    pub agenda_id: AgendaId,
}

/// An accepted vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: VoteId,
    pub member_id: String,
    pub session: VoteSessionSummary,
    pub choice: VoteChoice,
    pub cast_at: DateTime<Utc>,
}

impl From<CastVoteResult> for VoteResponse {
    fn from(result: CastVoteResult) -> Self {
        Self {
            id: *result.vote.id(),
            member_id: result.vote.member_id().as_str().to_string(),
            session: VoteSessionSummary {
                id: *result.session.id(),
                agenda_id: *result.session.agenda_id(),
            },
            choice: result.vote.choice(),
            cast_at: *result.vote.cast_at().as_datetime(),
        }
    }
}

/// Current tally of an agenda's session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyResponse {
    pub title: String,
    pub outcome: Outcome,
    pub total_votes: u64,
    pub affirmative_votes: u64,
    pub negative_votes: u64,
    pub opening_time: DateTime<Utc>,
    pub closing_time: DateTime<Utc>,
}

impl From<Report> for TallyResponse {
    fn from(report: Report) -> Self {
        Self {
            opening_time: *report.opening_time.as_datetime(),
            closing_time: *report.closing_time.as_datetime(),
            title: report.title,
            outcome: report.outcome,
            total_votes: report.total_votes,
            affirmative_votes: report.affirmative_votes,
            negative_votes: report.negative_votes,
        }
    }
}
