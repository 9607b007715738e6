//! Static eligibility checker.
//!
//! Answers from a fixed deny-list instead of calling the member registry.
//! Used when no eligibility service is configured, and in tests.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemberId};
use crate::ports::{Eligibility, EligibilityChecker};

/// Eligibility checker that allows everyone except a fixed set of members.
#[derive(Debug, Clone, Default)]
pub struct StaticEligibilityChecker {
    denied: HashSet<MemberId>,
}

impl StaticEligibilityChecker {
    /// Every member may vote.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// The listed members may not vote; everyone else may.
    pub fn denying(members: impl IntoIterator<Item = MemberId>) -> Self {
        Self {
            denied: members.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EligibilityChecker for StaticEligibilityChecker {
    async fn check_eligibility(&self, member_id: &MemberId) -> Result<Eligibility, DomainError> {
        if self.denied.contains(member_id) {
            Ok(Eligibility::unable())
        } else {
            Ok(Eligibility::able())
        }
    }
}
