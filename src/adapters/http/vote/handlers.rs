//! HTTP handlers for vote endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, error_response};
use crate::application::handlers::vote::{CastVoteCommand, CastVoteHandler};
use crate::domain::foundation::{MemberId, SessionId};
use crate::domain::vote::VoteError;

use super::dto::{CastVoteRequest, VoteResponse};

#[derive(Clone)]
pub struct VoteHandlers {
    cast_handler: Arc<CastVoteHandler>,
}

impl VoteHandlers {
    pub fn new(cast_handler: Arc<CastVoteHandler>) -> Self {
        Self { cast_handler }
    }
}

/// POST /api/votes - Cast a vote in an open session
pub async fn cast_vote(
    State(handlers): State<VoteHandlers>,
    Json(req): Json<CastVoteRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid session ID"),
    };
    let member_id = match MemberId::new(req.member_id) {
        Ok(id) => id,
        Err(e) => return handle_vote_error(e.into()),
    };

    let cmd = CastVoteCommand {
        member_id,
        session_id,
        choice: req.choice,
    };

    match handlers.cast_handler.handle(cmd).await {
        Ok(result) => {
            let response: VoteResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_vote_error(e),
    }
}

fn handle_vote_error(error: VoteError) -> Response {
    error_response(error.code(), error.message())
}
