//! Eligibility service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Member-eligibility service settings.
///
/// With no `base_url` every member is treated as eligible.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EligibilityConfig {
    /// Base URL of the member registry, e.g. `https://members.internal`
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EligibilityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Validate eligibility configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.base_url {
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                Err(ValidationError::InvalidEligibilityUrl)
            }
            _ => Ok(()),
        }
    }
}

fn default_timeout() -> u64 {
    3
}
