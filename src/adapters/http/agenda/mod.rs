//! HTTP adapter for agenda endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AgendaResponse, CreateAgendaRequest};
pub use handlers::AgendaHandlers;
pub use routes::agenda_routes;
