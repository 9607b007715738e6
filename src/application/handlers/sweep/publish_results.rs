//! PublishResultsHandler - the result sweep.
//!
//! For every `Closed` session not yet published: snapshot the canvass,
//! encode the report, claim the session by flipping `published` with a
//! conditional write, then publish to the results destination. Only the
//! sweep that wins the claim sends, so concurrent replicas publish each
//! result at most once. If sending fails the claim is released and the
//! session is picked up again on the next tick; an encoding failure
//! leaves it untouched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::domain::canvass::Report;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::Session;
use crate::ports::{CanvassRepository, MessageSink, ReportEncoder, SessionRepository};

/// What one publisher tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishSweepSummary {
    /// Closed, unpublished sessions found.
    pub examined: usize,
    /// Sessions this tick claimed and sent.
    pub published: usize,
    /// Sessions left for the next tick because the report failed to encode.
    pub skipped: usize,
    /// Sessions whose load, claim or send errored.
    pub failed: usize,
}

enum Attempt {
    Published,
    AlreadyPublished,
    Skipped,
}

/// Handler for the result-publishing sweep.
pub struct PublishResultsHandler {
    sessions: Arc<dyn SessionRepository>,
    canvasses: Arc<dyn CanvassRepository>,
    encoder: Arc<dyn ReportEncoder>,
    sink: Arc<dyn MessageSink>,
    destination: String,
}

impl PublishResultsHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        canvasses: Arc<dyn CanvassRepository>,
        encoder: Arc<dyn ReportEncoder>,
        sink: Arc<dyn MessageSink>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            canvasses,
            encoder,
            sink,
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Runs one sweep.
    ///
    /// Only the initial query can fail the sweep; per-session failures
    /// are logged and counted.
    pub async fn sweep(&self) -> Result<PublishSweepSummary, DomainError> {
        let pending = self.sessions.find_closed_unpublished().await?;
        let mut summary = PublishSweepSummary {
            examined: pending.len(),
            ..Default::default()
        };

        if pending.is_empty() {
            debug!("No results to publish");
            return Ok(summary);
        }

        for session in pending {
            match self.publish_one(session.clone()).await {
                Ok(Attempt::Published) => summary.published += 1,
                Ok(Attempt::AlreadyPublished) => {
                    debug!(session_id = %session.id(), "Result claimed by another sweep");
                }
                Ok(Attempt::Skipped) => summary.skipped += 1,
                Err(e) => {
                    warn!(session_id = %session.id(), error = %e, "Failed to publish result");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    async fn publish_one(&self, mut session: Session) -> Result<Attempt, DomainError> {
        let canvass = self
            .canvasses
            .find_by_id(session.canvass_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CanvassNotFound,
                    format!("Canvass not found: {}", session.canvass_id()),
                )
            })?;

        let report = Report::snapshot(&session, &canvass).to_published();
        let payload = match self.encoder.encode(&report) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(session_id = %session.id(), error = %e, "Report serialization failed");
                return Ok(Attempt::Skipped);
            }
        };

        session.mark_published()?;
        if !self.sessions.mark_published(session.id()).await? {
            return Ok(Attempt::AlreadyPublished);
        }

        if let Err(e) = self.sink.publish(&self.destination, &payload).await {
            self.release(&session).await;
            return Err(e);
        }

        info!(
            session_id = %session.id(),
            outcome = %report.outcome,
            total_votes = report.total_votes,
            destination = %self.destination,
            "Result published"
        );
        Ok(Attempt::Published)
    }

    async fn release(&self, session: &Session) {
        match self.sessions.release_publication(session.id()).await {
            Ok(true) => debug!(session_id = %session.id(), "Publication claim released"),
            Ok(false) => warn!(session_id = %session.id(), "Publication claim already released"),
            Err(e) => {
                error!(
                    session_id = %session.id(),
                    error = %e,
                    "Failed to release publication claim; result will not be retried"
                );
            }
        }
    }
}
