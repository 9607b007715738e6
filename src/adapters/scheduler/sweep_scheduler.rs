//! SweepScheduler - runs the closer and publisher sweeps on timers.
//!
//! The two sweeps run as independent loops so a slow broker never delays
//! closing sessions. Each loop stops when the shutdown channel flips to
//! `true`; a sweep that is already running finishes first.
//!
//! | Setting | Default |
//! |---------|---------|
//! | `closer_interval` | 60s |
//! | `publisher_interval` | 300s |

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::application::handlers::sweep::{
    CloseExpiredSessionsHandler, CloseSweepSummary, PublishResultsHandler, PublishSweepSummary,
};
use crate::config::SchedulerConfig;
use crate::domain::foundation::DomainError;

/// Tick periods for the two sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSchedulerConfig {
    pub closer_interval: Duration,
    pub publisher_interval: Duration,
}

impl Default for SweepSchedulerConfig {
    fn default() -> Self {
        Self {
            closer_interval: Duration::from_secs(60),
            publisher_interval: Duration::from_secs(300),
        }
    }
}

impl From<&SchedulerConfig> for SweepSchedulerConfig {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            closer_interval: config.closer_interval(),
            publisher_interval: config.publisher_interval(),
        }
    }
}

/// Drives the deadline and publication sweeps.
pub struct SweepScheduler {
    closer: Arc<CloseExpiredSessionsHandler>,
    publisher: Arc<PublishResultsHandler>,
    config: SweepSchedulerConfig,
}

impl SweepScheduler {
    pub fn new(
        closer: Arc<CloseExpiredSessionsHandler>,
        publisher: Arc<PublishResultsHandler>,
        config: SweepSchedulerConfig,
    ) -> Self {
        Self {
            closer,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> SweepSchedulerConfig {
        self.config
    }

    /// Runs both sweep loops until shutdown is signalled.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) {
        info!(
            closer_interval_secs = self.config.closer_interval.as_secs(),
            publisher_interval_secs = self.config.publisher_interval.as_secs(),
            destination = %self.publisher.destination(),
            "Sweep scheduler started"
        );

        tokio::join!(
            self.closer_loop(shutdown.clone()),
            self.publisher_loop(shutdown),
        );

        info!("Sweep scheduler stopped");
    }

    async fn closer_loop(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.closer_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
                _ = interval.tick() => {
                    let _ = self.tick_closer().await;
                }
            }
        }
    }

    async fn publisher_loop(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.publisher_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
                _ = interval.tick() => {
                    let _ = self.tick_publisher().await;
                }
            }
        }
    }

    /// One closer tick. Errors are logged and returned.
    pub async fn tick_closer(&self) -> Result<CloseSweepSummary, DomainError> {
        match self.closer.sweep().await {
            Ok(summary) => {
                if summary.examined > 0 {
                    info!(
                        examined = summary.examined,
                        closed = summary.closed,
                        failed = summary.failed,
                        "Closer sweep finished"
                    );
                } else {
                    debug!("Closer sweep found nothing to do");
                }
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, "Closer sweep failed");
                Err(e)
            }
        }
    }

    /// One publisher tick. Errors are logged and returned.
    pub async fn tick_publisher(&self) -> Result<PublishSweepSummary, DomainError> {
        match self.publisher.sweep().await {
            Ok(summary) => {
                if summary.examined > 0 {
                    info!(
                        examined = summary.examined,
                        published = summary.published,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        "Publisher sweep finished"
                    );
                } else {
                    debug!("Publisher sweep found nothing to do");
                }
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, "Publisher sweep failed");
                Err(e)
            }
        }
    }
}
