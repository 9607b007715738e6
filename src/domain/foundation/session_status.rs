//! SessionStatus enum for tracking the lifecycle of voting sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, Timestamp, ValidationError};

/// Lifecycle status of a voting session.
///
/// Transitions only move forward: `Waiting -> Open -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Waiting,
    Open,
    Closed,
}

impl SessionStatus {
    /// Returns true if votes may be recorded in this status.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, SessionStatus::Open)
    }

    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Waiting => "WAITING",
            SessionStatus::Open => "OPEN",
            SessionStatus::Closed => "CLOSED",
        }
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Waiting, Open) | (Open, Closed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStatus::Waiting => vec![SessionStatus::Open],
            SessionStatus::Open => vec![SessionStatus::Closed],
            SessionStatus::Closed => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(SessionStatus::Waiting),
            "OPEN" => Ok(SessionStatus::Open),
            "CLOSED" => Ok(SessionStatus::Closed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown session status '{}'", other),
            )),
        }
    }
}

/// Derives a session's status from the clock and its voting window.
///
/// `Waiting` before `opening`, `Closed` from `closing` onwards, `Open`
/// in between. Both boundaries belong to the later state.
pub fn status_for(now: Timestamp, opening: Timestamp, closing: Timestamp) -> SessionStatus {
    if now < opening {
        SessionStatus::Waiting
    } else if now >= closing {
        SessionStatus::Closed
    } else {
        SessionStatus::Open
    }
}
