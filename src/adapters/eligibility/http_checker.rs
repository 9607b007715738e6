//! HTTP client for the member registry's eligibility endpoint.
//!
//! `GET {base_url}/members/{member_id}/eligibility` answers
//! `{"ableToVote": bool}`. A 404 means the registry does not know the
//! member, which is treated as ineligible. Any other failure is reported
//! as `EligibilityUnavailable` so callers can tell an outage from a "no".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::ports::{Eligibility, EligibilityChecker};

/// Eligibility checker backed by the member registry's HTTP API.
pub struct HttpEligibilityChecker {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpEligibilityChecker {
    /// # Errors
    ///
    /// - `ValidationFailed` if `base_url` cannot be parsed
    /// - `InternalError` if the HTTP client cannot be built
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::validation("eligibility.base_url", format!("Invalid URL: {}", e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::validation(
                "eligibility.base_url",
                "URL cannot be used as a base",
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Builds the lookup URL, escaping the member ID as one path segment.
    fn eligibility_url(&self, member_id: &MemberId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["members", member_id.as_str(), "eligibility"]);
        }
        url
    }
}

fn unavailable(message: String) -> DomainError {
    DomainError::new(ErrorCode::EligibilityUnavailable, message)
}

#[async_trait]
impl EligibilityChecker for HttpEligibilityChecker {
    async fn check_eligibility(&self, member_id: &MemberId) -> Result<Eligibility, DomainError> {
        let url = self.eligibility_url(member_id);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(member_id = %member_id, error = %e, "Eligibility service unreachable");
            unavailable(format!("Eligibility request failed: {}", e))
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(Eligibility::unable()),
            status if !status.is_success() => {
                warn!(member_id = %member_id, %status, "Eligibility service error");
                return Err(unavailable(format!(
                    "Eligibility service returned {}",
                    status
                )));
            }
            _ => {}
        }

        response
            .json::<Eligibility>()
            .await
            .map_err(|e| unavailable(format!("Invalid eligibility response: {}", e)))
    }
}
