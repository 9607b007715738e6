//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own sub-router; [`api_router`] nests them under
//! `/api` and applies the shared middleware.

pub mod agenda;
pub mod error;
pub mod session;
pub mod vote;

use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use agenda::{agenda_routes, AgendaHandlers};
pub use error::ErrorResponse;
pub use session::{session_routes, SessionHandlers};
pub use vote::{vote_routes, TallyResponse, VoteHandlers};

/// Builds the full API router.
pub fn api_router(
    agendas: AgendaHandlers,
    sessions: SessionHandlers,
    votes: VoteHandlers,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/agendas", agenda_routes(agendas))
        .nest("/api/sessions", session_routes(sessions))
        .nest("/api/votes", vote_routes(votes))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
