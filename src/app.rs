//! Application wiring.
//!
//! Picks an adapter for every port from the configuration, builds the
//! handlers and exposes the HTTP router and sweep scheduler. Without a
//! database or Redis URL the service runs entirely in memory.

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tracing::{info, warn};

use crate::adapters::http::{api_router, AgendaHandlers, SessionHandlers, VoteHandlers};
use crate::adapters::memory::{InMemoryMessageSink, InMemoryStore, StaticEligibilityChecker};
use crate::adapters::postgres::{
    self, PostgresAgendaRepository, PostgresCanvassRepository, PostgresSessionRepository,
    PostgresVoteRepository,
};
use crate::adapters::redis::RedisMessageSink;
use crate::adapters::{HttpEligibilityChecker, JsonReportEncoder, SweepScheduler};
use crate::application::handlers::agenda::{CreateAgendaHandler, GetAgendaHandler};
use crate::application::handlers::session::{GetSessionHandler, OpenSessionHandler};
use crate::application::handlers::sweep::{CloseExpiredSessionsHandler, PublishResultsHandler};
use crate::application::handlers::vote::{CastVoteHandler, GetTallyHandler};
use crate::config::{AppConfig, ConfigError, ValidationError};
use crate::domain::foundation::DomainError;
use crate::domain::session::DeadlineMinutes;
use crate::ports::{
    AgendaRepository, CanvassRepository, EligibilityChecker, MessageSink, SessionRepository,
    VoteRepository,
};

/// Errors raised while starting the service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Startup failed: {0}")]
    Startup(#[from] DomainError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The four repositories, behind their ports.
#[derive(Clone)]
pub struct Stores {
    pub agendas: Arc<dyn AgendaRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub canvasses: Arc<dyn CanvassRepository>,
    pub votes: Arc<dyn VoteRepository>,
}

impl Stores {
    /// All repositories backed by one shared in-memory store.
    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            agendas: store.clone(),
            sessions: store.clone(),
            canvasses: store.clone(),
            votes: store,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            agendas: Arc::new(PostgresAgendaRepository::new(pool.clone())),
            sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
            canvasses: Arc::new(PostgresCanvassRepository::new(pool.clone())),
            votes: Arc::new(PostgresVoteRepository::new(pool)),
        }
    }
}

/// A wired service: HTTP router plus background sweeps.
pub struct Application {
    router: Router,
    scheduler: Arc<SweepScheduler>,
}

impl Application {
    /// Connects every configured backend and wires the handlers.
    pub async fn build(config: &AppConfig) -> Result<Self, AppError> {
        let stores = match &config.database {
            Some(database) => {
                let pool = postgres::connect(database).await?;
                if database.initialize_schema {
                    postgres::initialize_schema(&pool).await?;
                }
                Stores::postgres(pool)
            }
            None => {
                warn!("No database configured, using in-memory store");
                Stores::in_memory(InMemoryStore::new())
            }
        };

        let sink: Arc<dyn MessageSink> = match &config.redis {
            Some(redis) => Arc::new(RedisMessageSink::connect(redis).await?),
            None => {
                warn!("No Redis configured, results stay in process");
                Arc::new(InMemoryMessageSink::new())
            }
        };

        let eligibility: Arc<dyn EligibilityChecker> = match &config.eligibility.base_url {
            Some(base_url) => Arc::new(HttpEligibilityChecker::new(
                base_url,
                config.eligibility.timeout(),
            )?),
            None => {
                warn!("No eligibility service configured, every member may vote");
                Arc::new(StaticEligibilityChecker::allow_all())
            }
        };

        Self::from_parts(config, stores, sink, eligibility)
    }

    /// Wires handlers over already-built adapters.
    pub fn from_parts(
        config: &AppConfig,
        stores: Stores,
        sink: Arc<dyn MessageSink>,
        eligibility: Arc<dyn EligibilityChecker>,
    ) -> Result<Self, AppError> {
        let default_deadline = DeadlineMinutes::new(config.scheduler.default_deadline_minutes)
            .map_err(DomainError::from)?;

        let agendas = AgendaHandlers::new(
            Arc::new(CreateAgendaHandler::new(stores.agendas.clone())),
            Arc::new(GetAgendaHandler::new(stores.agendas.clone())),
            Arc::new(GetTallyHandler::new(
                stores.sessions.clone(),
                stores.canvasses.clone(),
            )),
        );
        let sessions = SessionHandlers::new(
            Arc::new(OpenSessionHandler::new(
                stores.agendas.clone(),
                stores.sessions.clone(),
                default_deadline,
            )),
            Arc::new(GetSessionHandler::new(
                stores.agendas.clone(),
                stores.sessions.clone(),
            )),
        );
        let votes = VoteHandlers::new(Arc::new(CastVoteHandler::new(
            stores.sessions.clone(),
            stores.votes.clone(),
            stores.canvasses.clone(),
            eligibility,
        )));

        let router = api_router(agendas, sessions, votes, config.server.request_timeout());

        let closer = Arc::new(CloseExpiredSessionsHandler::new(stores.sessions.clone()));
        let publisher = Arc::new(PublishResultsHandler::new(
            stores.sessions,
            stores.canvasses,
            Arc::new(JsonReportEncoder),
            sink,
            config.scheduler.report_destination.clone(),
        ));
        let scheduler = Arc::new(SweepScheduler::new(
            closer,
            publisher,
            (&config.scheduler).into(),
        ));

        info!(
            default_deadline_minutes = default_deadline.get(),
            destination = %config.scheduler.report_destination,
            "Application wired"
        );

        Ok(Self { router, scheduler })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn scheduler(&self) -> Arc<SweepScheduler> {
        self.scheduler.clone()
    }
}
