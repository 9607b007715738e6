//! VoteChoice enum - the two answers a member can give.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A member's answer to an agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Yes => "YES",
            VoteChoice::No => "NO",
        }
    }

    /// True for an affirmative vote.
    pub fn is_affirmative(&self) -> bool {
        matches!(self, VoteChoice::Yes)
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YES" => Ok(VoteChoice::Yes),
            "NO" => Ok(VoteChoice::No),
            other => Err(ValidationError::invalid_format(
                "choice",
                format!("expected YES or NO, got '{}'", other),
            )),
        }
    }
}
