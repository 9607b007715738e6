//! Agenda command and query handlers.

mod create_agenda;
mod get_agenda;

pub use create_agenda::{CreateAgendaCommand, CreateAgendaHandler};
pub use get_agenda::{GetAgendaHandler, GetAgendaQuery};
