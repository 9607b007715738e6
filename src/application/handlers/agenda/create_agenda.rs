//! CreateAgendaHandler - Command handler for registering agendas.

use std::sync::Arc;

use tracing::info;

use crate::domain::agenda::{Agenda, AgendaError};
use crate::ports::AgendaRepository;

/// Command to register a new agenda.
#[derive(Debug, Clone)]
pub struct CreateAgendaCommand {
    pub title: String,
}

/// Handler for registering agendas.
pub struct CreateAgendaHandler {
    repository: Arc<dyn AgendaRepository>,
}

impl CreateAgendaHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateAgendaCommand) -> Result<Agenda, AgendaError> {
        let agenda = Agenda::new(cmd.title)?;

        self.repository.save(&agenda).await?;

        info!(agenda_id = %agenda.id(), title = agenda.title(), "Agenda registered");
        Ok(agenda)
    }
}
