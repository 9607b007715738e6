//! EligibilityChecker port - asks the member registry whether a member
//! may vote.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MemberId};

/// Answer from the eligibility service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub able_to_vote: bool,
}

impl Eligibility {
    pub fn able() -> Self {
        Self { able_to_vote: true }
    }

    pub fn unable() -> Self {
        Self {
            able_to_vote: false,
        }
    }
}

/// Port for the external member-eligibility service.
#[async_trait]
pub trait EligibilityChecker: Send + Sync {
    /// # Errors
    ///
    /// - `EligibilityUnavailable` if the service cannot answer
    async fn check_eligibility(&self, member_id: &MemberId) -> Result<Eligibility, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_deserializes_camel_case() {
        let e: Eligibility = serde_json::from_str(r#"{"ableToVote":false}"#).unwrap();
        assert_eq!(e, Eligibility::unable());
    }

    #[test]
    fn eligibility_checker_is_object_safe() {
        fn _accepts_dyn(_checker: &dyn EligibilityChecker) {}
    }
}
