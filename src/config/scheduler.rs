//! Sweep scheduler configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Timing and destination for the two background sweeps.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between session-closer ticks
    #[serde(default = "default_closer_interval")]
    pub closer_interval_secs: u64,

    /// Seconds between result-publisher ticks
    #[serde(default = "default_publisher_interval")]
    pub publisher_interval_secs: u64,

    /// Broker destination (channel) that receives final results
    #[serde(default = "default_report_destination")]
    pub report_destination: String,

    /// Voting window used when a session is opened without one
    #[serde(default = "default_deadline_minutes")]
    pub default_deadline_minutes: u32,
}

impl SchedulerConfig {
    pub fn closer_interval(&self) -> Duration {
        Duration::from_secs(self.closer_interval_secs)
    }

    pub fn publisher_interval(&self) -> Duration {
        Duration::from_secs(self.publisher_interval_secs)
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.closer_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval("closer_interval_secs"));
        }
        if self.publisher_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval("publisher_interval_secs"));
        }
        if self.report_destination.trim().is_empty() {
            return Err(ValidationError::EmptyReportDestination);
        }
        if self.default_deadline_minutes == 0 {
            return Err(ValidationError::InvalidDefaultDeadline);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            closer_interval_secs: default_closer_interval(),
            publisher_interval_secs: default_publisher_interval(),
            report_destination: default_report_destination(),
            default_deadline_minutes: default_deadline_minutes(),
        }
    }
}

fn default_closer_interval() -> u64 {
    60
}

fn default_publisher_interval() -> u64 {
    300
}

fn default_report_destination() -> String {
    "assembly.results".to_string()
}

fn default_deadline_minutes() -> u32 {
    1
}
