//! HTTP routes for agenda endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_agenda, get_agenda, get_tally, AgendaHandlers};

/// Creates the agenda router, including the tally query.
pub fn agenda_routes(handlers: AgendaHandlers) -> Router {
    Router::new()
        .route("/", post(create_agenda))
        .route("/:id", get(get_agenda))
        .route("/:id/tally", get(get_tally))
        .with_state(handlers)
}
