//! HTTP routes for vote endpoints.

use axum::{routing::post, Router};

use super::handlers::{cast_vote, VoteHandlers};

pub fn vote_routes(handlers: VoteHandlers) -> Router {
    Router::new()
        .route("/", post(cast_vote))
        .with_state(handlers)
}
